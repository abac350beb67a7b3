use std::io;

use clap::Args;

use canteen::{
    context::AppContext,
    facades::CancelSignal,
    orders::models::{CheckoutDetails, PaymentMethod},
};

use crate::render;

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Counter to collect the order from
    #[arg(long)]
    pickup_location: Option<String>,

    /// Minutes from now until pickup
    #[arg(long)]
    pickup_in: Option<u32>,

    /// upi, card, wallet or campus_card
    #[arg(long)]
    payment: Option<PaymentMethod>,

    /// Note for the kitchen
    #[arg(long)]
    note: Option<String>,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    context: &AppContext,
    cancel: &CancelSignal,
    out: &mut impl io::Write,
) -> Result<(), String> {
    if !context.session.check_auth() {
        return Err("Please sign in before placing an order".to_string());
    }

    let details = CheckoutDetails {
        pickup_location: args.pickup_location,
        pickup_in_minutes: args.pickup_in,
        special_instructions: args.note,
        payment_method: args.payment,
    };

    let order = context
        .checkout
        .place_order(details, cancel)
        .await
        .map_err(|error| error.to_string())?;

    render::write_order(out, &order).map_err(|error| error.to_string())
}
