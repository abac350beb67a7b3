//! Canteen
//!
//! Client core for a campus canteen: browse the menu, build a cart, sign in
//! and place pickup orders, then follow them through the kitchen.
//!
//! All client state lives in a [`Store`](store::Store). Facades in
//! [`facades`] call the external services, guard each call with a timeout
//! and a cancellation signal, and record the outcome in the store. The cart,
//! the order history and the session survive restarts through a
//! [`Storage`](store::Storage) backend.

pub mod auth;
pub mod cart;
pub mod context;
pub mod facades;
pub mod menu;
pub mod orders;
pub mod pricing;
pub mod store;

#[cfg(test)]
mod testing;

mod uuids;
