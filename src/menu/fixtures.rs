//! The canteen's standing menu.
//!
//! Served by [`FixtureMenuService`](super::FixtureMenuService) and reused by
//! tests that need realistic items.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::menu::models::{Category, DietaryInfo, MenuItem, MenuItemUuid};

/// Masala Dosa
pub const MASALA_DOSA: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0001));

/// Chicken Biryani
pub const CHICKEN_BIRYANI: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0002));

/// Veg Thali
pub const VEG_THALI: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0003));

/// Chicken Burger
pub const CHICKEN_BURGER: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0004));

/// Coffee
pub const COFFEE: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0005));

/// French Fries
pub const FRENCH_FRIES: MenuItemUuid =
    MenuItemUuid::from_uuid(Uuid::from_u128(0x0192_b3a0_0000_7000_8000_0000_0000_0006));

#[expect(
    clippy::too_many_arguments,
    reason = "flat constructor keeps the fixture table readable"
)]
fn item(
    id: MenuItemUuid,
    name: &str,
    description: &str,
    price: i64,
    category: &str,
    preparation_minutes: u32,
    allergens: &[&str],
    dietary: DietaryInfo,
) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Decimal::from(price),
        category: category.to_string(),
        image_url: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
        is_available: true,
        preparation_minutes,
        allergens: allergens.iter().map(ToString::to_string).collect(),
        dietary,
    }
}

const VEG: DietaryInfo = DietaryInfo {
    is_veg: true,
    is_spicy: false,
};

const NON_VEG: DietaryInfo = DietaryInfo {
    is_veg: false,
    is_spicy: false,
};

/// All menu items currently served.
pub fn menu_items() -> Vec<MenuItem> {
    vec![
        item(
            MASALA_DOSA,
            "Masala Dosa",
            "Crispy dosa with potato masala, served with coconut chutney and sambar",
            45,
            "breakfast",
            8,
            &["dairy"],
            VEG,
        ),
        item(
            CHICKEN_BIRYANI,
            "Chicken Biryani",
            "Fragrant basmati rice with tender chicken, aromatic spices, and mint raita",
            120,
            "lunch",
            15,
            &["nuts"],
            DietaryInfo {
                is_veg: false,
                is_spicy: true,
            },
        ),
        item(
            VEG_THALI,
            "Veg Thali",
            "Complete Indian meal with dal, vegetables, rice, roti, and salad",
            80,
            "lunch",
            12,
            &["gluten"],
            VEG,
        ),
        item(
            CHICKEN_BURGER,
            "Chicken Burger",
            "Grilled chicken patty with lettuce, tomato, and special sauce",
            95,
            "snacks",
            10,
            &["gluten", "dairy"],
            NON_VEG,
        ),
        item(
            COFFEE,
            "Coffee",
            "Hot filter coffee with milk and sugar",
            25,
            "beverages",
            3,
            &["dairy"],
            VEG,
        ),
        item(
            FRENCH_FRIES,
            "French Fries",
            "Crispy golden fries with seasoning and ketchup",
            60,
            "snacks",
            7,
            &[],
            VEG,
        ),
    ]
}

/// Menu categories, in display order.
pub fn categories() -> Vec<Category> {
    [
        ("breakfast", "Breakfast", "🌅"),
        ("lunch", "Lunch", "🍽️"),
        ("snacks", "Snacks", "🍟"),
        ("beverages", "Beverages", "☕"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        description: None,
    })
    .collect()
}

/// Look up a fixture item by id.
pub fn menu_item(id: MenuItemUuid) -> Option<MenuItem> {
    menu_items().into_iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_belongs_to_a_known_category() {
        let categories = categories();

        for item in menu_items() {
            assert!(
                categories.iter().any(|category| category.id == item.category),
                "{} has unknown category {}",
                item.name,
                item.category
            );
        }
    }

    #[test]
    fn item_ids_are_unique() {
        let items = menu_items();

        for (i, item) in items.iter().enumerate() {
            assert!(
                items.iter().skip(i + 1).all(|other| other.id != item.id),
                "duplicate id for {}",
                item.name
            );
        }
    }

    #[test]
    fn looks_up_by_id() {
        let coffee = menu_item(COFFEE);

        assert_eq!(coffee.map(|item| item.price), Some(Decimal::from(25)));
    }
}
