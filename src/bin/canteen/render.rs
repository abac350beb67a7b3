//! Table output for menus, carts and orders.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use canteen::{
    cart::CartItem,
    menu::models::{Category, MenuItem},
    orders::{
        models::Order,
        status::{HAPPY_PATH, OrderStatus},
    },
    pricing::{CartTotals, PricingError, format_amount},
};

/// Errors raised while writing output.
#[derive(Debug, Error)]
pub(crate) enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// An amount couldn't be formatted.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Columns<std::ops::Range<usize>>,
) -> Result<(), RenderError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(right_aligned, Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}

fn dietary(item: &MenuItem) -> String {
    let mut tags = vec![if item.dietary.is_veg { "veg" } else { "non-veg" }];

    if item.dietary.is_spicy {
        tags.push("spicy");
    }

    tags.join(", ")
}

pub(crate) fn write_menu(
    out: &mut impl io::Write,
    items: &[&MenuItem],
    counts: &[(&Category, usize)],
) -> Result<(), RenderError> {
    let summary: Vec<String> = counts
        .iter()
        .map(|(category, count)| format!("{} {} ({count})", category.icon, category.name))
        .collect();

    writeln!(out, "{}", summary.join("  "))?;

    if items.is_empty() {
        writeln!(out, "No dishes match.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Dish", "Category", "Price", "Ready in", "Dietary", "Available"]);

    for item in items {
        builder.push_record([
            item.name.clone(),
            item.category.clone(),
            format_amount(item.price)?,
            format!("{} min", item.preparation_minutes),
            dietary(item),
            if item.is_available { "yes" } else { "no" }.to_string(),
        ]);
    }

    write_table(out, builder, Columns::new(2..4))
}

fn write_lines(out: &mut impl io::Write, lines: &[CartItem]) -> Result<(), RenderError> {
    let mut builder = Builder::default();

    builder.push_record(["Dish", "Qty", "Unit", "Line total", "Notes"]);

    for line in lines {
        builder.push_record([
            line.item.name.clone(),
            line.quantity.to_string(),
            format_amount(line.item.price)?,
            format_amount(line.line_total())?,
            line.special_instructions.clone().unwrap_or_default(),
        ]);
    }

    write_table(out, builder, Columns::new(1..4))
}

pub(crate) fn write_cart(
    out: &mut impl io::Write,
    cart: &[CartItem],
    totals: CartTotals,
) -> Result<(), RenderError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    write_lines(out, cart)?;

    writeln!(out, "Subtotal:        {}", format_amount(totals.subtotal)?)?;
    writeln!(out, "Tax (5%):        {}", format_amount(totals.tax)?)?;
    writeln!(out, "Service (2%):    {}", format_amount(totals.service_charge)?)?;
    writeln!(out, "Total:           {}", format_amount(totals.total)?)?;

    Ok(())
}

pub(crate) fn write_orders(out: &mut impl io::Write, orders: &[Order]) -> Result<(), RenderError> {
    if orders.is_empty() {
        writeln!(out, "No orders yet.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Order", "Placed", "Items", "Total", "Status", "Pickup"]);

    for order in orders {
        builder.push_record([
            order.order_number.clone(),
            order.created_at.strftime(TIME_FORMAT).to_string(),
            order.item_count().to_string(),
            format_amount(order.total_amount)?,
            order.status.label().to_string(),
            order.pickup_location.clone(),
        ]);
    }

    write_table(out, builder, Columns::new(2..4))
}

fn progress(status: OrderStatus) -> String {
    let steps = HAPPY_PATH.len();

    match status.progress() {
        Some(step) => format!("step {} of {steps}", step + 1),
        None => "stopped".to_string(),
    }
}

pub(crate) fn write_order(out: &mut impl io::Write, order: &Order) -> Result<(), RenderError> {
    writeln!(out, "{} ({})", order.order_number, order.id)?;
    writeln!(
        out,
        "{}: {} [{}]",
        order.status.label(),
        order.status.description(),
        progress(order.status)
    )?;
    writeln!(out, "Payment: {}", order.payment_status)?;

    if let Some(method) = order.payment_method {
        writeln!(out, "Paying by: {method}")?;
    }

    writeln!(
        out,
        "Pickup at {} around {}",
        order.pickup_location,
        order.estimated_pickup_time.strftime(TIME_FORMAT)
    )?;

    if let Some(note) = &order.special_instructions {
        writeln!(out, "Note: {note}")?;
    }

    write_lines(out, &order.items)?;

    writeln!(out, "Total:           {}", format_amount(order.total_amount)?)?;

    Ok(())
}
