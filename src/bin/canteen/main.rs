//! Canteen CLI

#![expect(
    clippy::print_stderr,
    reason = "errors are reported on stderr before and after logging is initialised"
)]

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
