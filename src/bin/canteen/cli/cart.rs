use std::io;

use clap::{Args, Subcommand};

use canteen::{context::AppContext, facades::CancelSignal};

use super::{menu::find_item, write_line};
use crate::render;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add a dish
    Add(AddArgs),

    /// Remove a dish
    Remove(DishArgs),

    /// Set the quantity of a dish; 0 removes it
    SetQty(SetQtyArgs),

    /// Show the cart and its totals
    Show,

    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
struct DishArgs {
    /// Dish name or id
    dish: String,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Dish name or id
    dish: String,

    /// How many to add
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    quantity: u32,

    /// Note for the kitchen about this dish
    #[arg(long)]
    note: Option<String>,
}

#[derive(Debug, Args)]
struct SetQtyArgs {
    /// Dish name or id
    dish: String,

    /// New quantity
    quantity: u32,
}

pub(crate) async fn run(
    command: CartCommand,
    context: &AppContext,
    cancel: &CancelSignal,
    out: &mut impl io::Write,
) -> Result<(), String> {
    match command.command {
        CartSubcommand::Add(args) => add(args, context, cancel, out).await,
        CartSubcommand::Remove(args) => {
            let item_id = cart_line(context, &args.dish)?;

            context.store.remove_from_cart(item_id);

            show(context, out)
        }
        CartSubcommand::SetQty(args) => {
            let item_id = cart_line(context, &args.dish)?;

            context
                .store
                .update_cart_item_quantity(item_id, args.quantity);

            show(context, out)
        }
        CartSubcommand::Show => show(context, out),
        CartSubcommand::Clear => {
            context.store.clear_cart();

            write_line(out, "Cart cleared.")
        }
    }
}

async fn add(
    args: AddArgs,
    context: &AppContext,
    cancel: &CancelSignal,
    out: &mut impl io::Write,
) -> Result<(), String> {
    context
        .catalog
        .load_menu(cancel)
        .await
        .map_err(|error| format!("failed to load menu: {error}"))?;

    let state = context.store.state();
    let item = find_item(&state.menu_items, &args.dish)?;

    if !item.is_available {
        return Err(format!("{} is currently unavailable", item.name));
    }

    context.store.add_to_cart(item, args.quantity, args.note);

    show(context, out)
}

/// Resolve a dish among the lines already in the cart.
fn cart_line(
    context: &AppContext,
    dish: &str,
) -> Result<canteen::menu::models::MenuItemUuid, String> {
    let state = context.store.state();
    let items: Vec<_> = state.cart.iter().map(|line| line.item.clone()).collect();

    find_item(&items, dish)
        .map(|item| item.id)
        .map_err(|error| format!("{error} in your cart"))
}

fn show(context: &AppContext, out: &mut impl io::Write) -> Result<(), String> {
    let state = context.store.state();

    render::write_cart(out, &state.cart, state.cart_totals()).map_err(|error| error.to_string())
}
