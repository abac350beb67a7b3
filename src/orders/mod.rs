//! Orders

pub mod errors;
pub mod models;
pub mod service;
pub mod status;

pub use errors::OrderServiceError;
pub use service::*;
