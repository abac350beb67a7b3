//! Cart Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::menu::models::{MenuItem, MenuItemUuid};

/// Highest unit price a cart line may carry.
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// CartItem Model
///
/// Carries a snapshot of the menu item taken when it was added, so the
/// price shown stays stable if the menu changes underneath the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Id of the menu item this line refers to.
    pub item_id: MenuItemUuid,

    /// Menu item as it was when added.
    pub item: MenuItem,

    /// Number of units; never zero inside a cart.
    pub quantity: u32,

    /// Free-text note for the kitchen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

impl CartItem {
    /// Create a cart line for `quantity` units of `item`.
    #[must_use]
    pub fn new(item: &MenuItem, quantity: u32, special_instructions: Option<String>) -> Self {
        Self {
            item_id: item.id,
            item: item.clone(),
            quantity,
            special_instructions,
        }
    }

    /// Unit price times quantity, saturating at the largest [`Decimal`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// The snapshot price lies within `0..=MAX_UNIT_PRICE`.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        (Decimal::ZERO..=MAX_UNIT_PRICE).contains(&self.item.price)
    }
}

/// Merge `line` into `cart`.
///
/// Lines with zero quantity or an out-of-range price are dropped, and a
/// line for an item already in the cart adds to its quantity.
pub fn add_line(cart: &mut Vec<CartItem>, line: CartItem) {
    if line.quantity == 0 || !line.has_valid_price() {
        return;
    }

    match cart.iter_mut().find(|existing| existing.item_id == line.item_id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
        None => cart.push(line),
    }
}

/// Rebuild `lines` into a cart holding at most one line per menu item,
/// every one with a positive quantity and an in-range price.
#[must_use]
pub fn normalize(lines: Vec<CartItem>) -> Vec<CartItem> {
    lines.into_iter().fold(Vec::new(), |mut cart, line| {
        add_line(&mut cart, line);

        cart
    })
}
