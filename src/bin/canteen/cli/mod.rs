use std::{io, sync::Arc};

use clap::{Parser, Subcommand};
use tracing::warn;

use canteen::{
    context::{AppContext, Services},
    facades::{CancelSignal, cancellation},
    store::FileStorage,
};

use crate::config::{ClientConfig, LoggingConfig};

mod cart;
mod checkout;
mod menu;
mod orders;
mod session;

#[derive(Debug, Parser)]
#[command(name = "canteen", about = "Campus canteen ordering", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(flatten)]
    client: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(menu::MenuArgs),

    /// Sign in
    Login(session::LoginArgs),

    /// Create an account and sign in
    Signup(session::SignupArgs),

    /// Sign out and forget the cart and order history
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage the cart
    Cart(cart::CartCommand),

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Review placed orders
    Orders(orders::OrdersCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::new(
            Arc::new(FileStorage::new(self.client.data_dir.clone())),
            Services::in_memory(self.client.latency()),
            self.client.policy(),
        );

        let cancel = interrupt_signal();
        let mut out = io::stdout();

        match self.command {
            Commands::Menu(args) => menu::run(args, &context, &cancel, &mut out).await,
            Commands::Login(args) => session::login(args, &context, &cancel, &mut out).await,
            Commands::Signup(args) => session::signup(args, &context, &cancel, &mut out).await,
            Commands::Logout => session::logout(&context, &mut out),
            Commands::Whoami => session::whoami(&context, &mut out),
            Commands::Cart(command) => cart::run(command, &context, &cancel, &mut out).await,
            Commands::Checkout(args) => checkout::run(args, &context, &cancel, &mut out).await,
            Commands::Orders(command) => orders::run(command, &context, &mut out),
        }
    }
}

/// Cancel the in-flight service call on Ctrl+C.
fn interrupt_signal() -> CancelSignal {
    let (canceller, signal) = cancellation();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling in-flight call");
            canceller.cancel();
        }
    });

    signal
}

fn write_line(out: &mut impl io::Write, line: &str) -> Result<(), String> {
    writeln!(out, "{line}").map_err(|error| format!("failed to write output: {error}"))
}
