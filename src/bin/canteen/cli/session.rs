use std::io;

use clap::Args;

use canteen::{
    auth::{Credentials, Registration},
    context::AppContext,
    facades::CancelSignal,
};

use super::write_line;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Login email
    #[arg(long)]
    email: String,

    /// Password
    #[arg(long, env = "CANTEEN_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct SignupArgs {
    /// Given name
    #[arg(long)]
    first_name: String,

    /// Family name
    #[arg(long)]
    last_name: String,

    /// Login email
    #[arg(long)]
    email: String,

    /// College roll number
    #[arg(long)]
    student_id: String,

    /// Contact number
    #[arg(long)]
    phone: Option<String>,

    /// Password, at least 8 characters
    #[arg(long, env = "CANTEEN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password again
    #[arg(long)]
    confirm_password: String,

    /// Accept the terms and conditions
    #[arg(long)]
    agree_to_terms: bool,
}

pub(crate) async fn login(
    args: LoginArgs,
    context: &AppContext,
    cancel: &CancelSignal,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let user = context
        .session
        .login(Credentials::new(args.email, args.password), cancel)
        .await
        .map_err(|error| format!("{}: {error}", failure(context)))?;

    write_line(out, &format!("Welcome back, {}.", user.first_name))
}

pub(crate) async fn signup(
    args: SignupArgs,
    context: &AppContext,
    cancel: &CancelSignal,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let registration = Registration {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        student_id: args.student_id,
        phone: args.phone,
        password: args.password,
        confirm_password: args.confirm_password,
        agree_to_terms: args.agree_to_terms,
    };

    let user = context
        .session
        .signup(registration, cancel)
        .await
        .map_err(|error| format!("{}: {error}", failure(context)))?;

    write_line(out, &format!("Account created. Welcome, {}.", user.full_name()))
}

pub(crate) fn logout(context: &AppContext, out: &mut impl io::Write) -> Result<(), String> {
    context.session.logout();

    write_line(out, "Signed out.")
}

pub(crate) fn whoami(context: &AppContext, out: &mut impl io::Write) -> Result<(), String> {
    let state = context.store.state();

    match (&state.user, context.session.check_auth()) {
        (Some(user), true) => {
            let student_id = user.student_id.as_deref().unwrap_or("-");

            write_line(
                out,
                &format!("{} <{}> student id {student_id}", user.full_name(), user.email),
            )
        }
        _ => write_line(out, "Not signed in."),
    }
}

/// Message recorded in the store for the last failure.
fn failure(context: &AppContext) -> String {
    context
        .store
        .state()
        .error
        .clone()
        .unwrap_or_else(|| "Request failed".to_string())
}
