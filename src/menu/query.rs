//! Menu browsing: category filter, free-text search and sorting.

use std::cmp::Ordering;

use crate::menu::models::{Category, MenuItem};

/// Sort order for a menu listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuSort {
    /// Alphabetical by name.
    #[default]
    Name,

    /// Cheapest first.
    Price,

    /// Quickest first.
    PreparationTime,
}

/// Filter and ordering applied to the cached menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    /// Restrict to one category id; `None` shows everything.
    pub category: Option<String>,

    /// Case-insensitive substring matched against name and description.
    pub search: String,

    /// Result order.
    pub sort: MenuSort,
}

impl MenuQuery {
    /// Apply the query to a set of menu items.
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        let needle = self.search.trim().to_lowercase();

        let mut matches: Vec<&MenuItem> = items
            .iter()
            .filter(|item| {
                self.category
                    .as_deref()
                    .is_none_or(|category| item.category == category)
            })
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.description.to_lowercase().contains(&needle)
            })
            .collect();

        matches.sort_by(|a, b| self.compare(a, b));

        matches
    }

    fn compare(&self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self.sort {
            MenuSort::Name => a.name.cmp(&b.name),
            MenuSort::Price => a.price.cmp(&b.price),
            MenuSort::PreparationTime => a.preparation_minutes.cmp(&b.preparation_minutes),
        }
    }
}

/// Number of menu items in each category, in category order.
pub fn category_counts<'a>(
    categories: &'a [Category],
    items: &[MenuItem],
) -> Vec<(&'a Category, usize)> {
    categories
        .iter()
        .map(|category| {
            let count = items
                .iter()
                .filter(|item| item.category == category.id)
                .count();

            (category, count)
        })
        .collect()
}
