//! Menu

pub mod errors;
pub mod fixtures;
pub mod models;
pub mod query;
pub mod service;

pub use errors::MenuServiceError;
pub use service::*;
