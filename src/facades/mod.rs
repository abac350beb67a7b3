//! Asynchronous operations that call external services and record their
//! outcome in the [`Store`](crate::store::Store).

pub mod calls;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod tracking;

pub use calls::{CallError, CallPolicy, CancelSignal, Canceller, cancellation};
pub use catalog::{Catalog, CatalogError};
pub use checkout::{Checkout, CheckoutError};
pub use session::{Session, SessionError};
pub use tracking::{Tracking, TrackingError};
