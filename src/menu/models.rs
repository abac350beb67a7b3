//! Menu Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::uuids::TypedUuid;

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItem>;

/// Menu Item Model
///
/// Owned by the menu service and cached read-only in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable item identifier.
    pub id: MenuItemUuid,

    /// Display name.
    pub name: String,

    /// Short description shown under the name.
    pub description: String,

    /// Unit price in rupees.
    pub price: Decimal,

    /// Category id, e.g. `lunch`.
    pub category: String,

    /// Image path relative to the static assets root.
    pub image_url: String,

    /// Whether the kitchen is currently serving this item.
    pub is_available: bool,

    /// Estimated preparation time in minutes.
    pub preparation_minutes: u32,

    /// Allergen labels, e.g. `dairy`.
    pub allergens: Vec<String>,

    /// Dietary flags.
    pub dietary: DietaryInfo,
}

/// Dietary flags for a menu item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryInfo {
    /// Vegetarian.
    pub is_veg: bool,

    /// Spicy.
    pub is_spicy: bool,
}

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Slug matched against [`MenuItem::category`].
    pub id: String,

    /// Display name.
    pub name: String,

    /// Emoji icon.
    pub icon: String,

    /// Optional blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
