//! Authentication

mod errors;
mod models;
mod service;
mod validation;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use validation::MIN_PASSWORD_LENGTH;
