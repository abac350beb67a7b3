use std::io;

use clap::{Args, Subcommand};

use canteen::{
    context::AppContext,
    orders::{
        models::{Order, OrderUuid},
        status::OrderStatus,
    },
};

use super::write_line;
use crate::render;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, most recent first
    List,

    /// Show one order
    Show(OrderArgs),

    /// Record a status reported by the kitchen
    Mark(MarkArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    /// Order number (ORD-123456) or id
    order: String,
}

#[derive(Debug, Args)]
struct MarkArgs {
    /// Order number (ORD-123456) or id
    order: String,

    /// pending, confirmed, in_progress, ready_for_pickup, completed or cancelled
    status: OrderStatus,
}

pub(crate) fn run(
    command: OrdersCommand,
    context: &AppContext,
    out: &mut impl io::Write,
) -> Result<(), String> {
    let state = context.store.state();

    match command.command {
        OrdersSubcommand::List => {
            render::write_orders(out, &state.orders).map_err(|error| error.to_string())
        }
        OrdersSubcommand::Show(args) => {
            let order = find_order(&state.orders, &args.order)?;

            render::write_order(out, order).map_err(|error| error.to_string())
        }
        OrdersSubcommand::Mark(args) => {
            let order = find_order(&state.orders, &args.order)?;

            context.store.update_order_status(order.id, args.status);

            write_line(
                out,
                &format!("{} is now {}", order.order_number, args.status.label()),
            )
        }
    }
}

fn find_order<'a>(orders: &'a [Order], needle: &str) -> Result<&'a Order, String> {
    let id = needle.parse::<OrderUuid>().ok();

    orders
        .iter()
        .find(|order| Some(order.id) == id || order.order_number.eq_ignore_ascii_case(needle.trim()))
        .ok_or_else(|| format!("no order {needle}"))
}
