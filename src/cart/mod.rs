//! Cart

pub mod models;

pub use models::{CartItem, MAX_UNIT_PRICE, add_line, normalize};
