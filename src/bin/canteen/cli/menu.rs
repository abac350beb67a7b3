use std::io;

use clap::{Args, ValueEnum};

use canteen::{
    context::AppContext,
    facades::CancelSignal,
    menu::{
        models::{MenuItem, MenuItemUuid},
        query::{MenuQuery, MenuSort, category_counts},
    },
};

use crate::render;

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum SortKey {
    #[default]
    Name,
    Price,
    Time,
}

impl From<SortKey> for MenuSort {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => Self::Name,
            SortKey::Price => Self::Price,
            SortKey::Time => Self::PreparationTime,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Only show one category, e.g. breakfast
    #[arg(long)]
    category: Option<String>,

    /// Match dish names and descriptions
    #[arg(long, default_value = "")]
    search: String,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,
}

pub(crate) async fn run(
    args: MenuArgs,
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

    let query = MenuQuery {
        category: args.category,
        search: args.search,
        sort: args.sort.into(),
    };

    let listed = query.apply(&state.menu_items);

    render::write_menu(
        out,
        &listed,
        &category_counts(&state.categories, &state.menu_items),
    )
    .map_err(|error| error.to_string())
}

/// Find a dish by id or by name. Exact names win; otherwise the name must
/// contain `needle` for exactly one dish.
pub(crate) fn find_item<'a>(items: &'a [MenuItem], needle: &str) -> Result<&'a MenuItem, String> {
    if let Ok(id) = needle.parse::<MenuItemUuid>() {
        return items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| format!("no dish with id {needle}"));
    }

    let needle = needle.trim().to_lowercase();

    if let Some(item) = items.iter().find(|item| item.name.to_lowercase() == needle) {
        return Ok(item);
    }

    let mut matches = items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&needle));

    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (None, _) => Err(format!("no dish matches \"{needle}\"")),
        (Some(_), Some(_)) => Err(format!("\"{needle}\" matches more than one dish")),
    }
}
