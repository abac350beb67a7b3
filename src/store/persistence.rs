//! Mapping between store state and durable storage records.
//!
//! Four records are kept: the session token (plain string), the cart, the
//! order list and the user profile. JSON records are wrapped in a versioned
//! envelope, `{"version": 1, "data": ...}`. The cart and order records are
//! removed rather than stored empty.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    auth::{SessionToken, User},
    cart::{self, CartItem},
    orders::models::Order,
    store::storage::{Storage, StorageError},
};

/// Session token key.
pub const TOKEN_KEY: &str = "authToken";

/// Cart key.
pub const CART_KEY: &str = "cart";

/// Orders key.
pub const ORDERS_KEY: &str = "orders";

/// User profile key.
pub const USER_KEY: &str = "user";

/// Version written into every record envelope.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors raised while reading or writing a persisted record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The record isn't valid JSON or doesn't match the expected shape.
    #[error("malformed {key} record")]
    Malformed {
        /// Record key.
        key: &'static str,

        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The record was written by an incompatible schema version.
    #[error("{key} record has unsupported schema version {version}")]
    UnsupportedVersion {
        /// Record key.
        key: &'static str,

        /// Version found in the envelope.
        version: u32,
    },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T: ?Sized> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    data: Value,
}

fn write_record<T: Serialize + ?Sized>(
    storage: &dyn Storage,
    key: &'static str,
    data: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        data,
    })
    .map_err(|source| PersistenceError::Malformed { key, source })?;

    storage.set(key, &json)?;

    Ok(())
}

fn read_record<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &'static str,
) -> Result<Option<T>, PersistenceError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    let envelope: Envelope = serde_json::from_str(&raw)
        .map_err(|source| PersistenceError::Malformed { key, source })?;

    if envelope.version != SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            key,
            version: envelope.version,
        });
    }

    serde_json::from_value(envelope.data)
        .map(Some)
        .map_err(|source| PersistenceError::Malformed { key, source })
}

fn write_or_remove<T: Serialize>(
    storage: &dyn Storage,
    key: &'static str,
    records: &[T],
) -> Result<(), PersistenceError> {
    if records.is_empty() {
        storage.remove(key)?;

        return Ok(());
    }

    write_record(storage, key, records)
}

/// Persist the cart, removing the record when the cart is empty.
///
/// # Errors
///
/// Returns a [`PersistenceError`] if the record can't be written.
pub fn save_cart(storage: &dyn Storage, cart: &[CartItem]) -> Result<(), PersistenceError> {
    write_or_remove(storage, CART_KEY, cart)
}

/// Persist the order list, removing the record when there are no orders.
///
/// # Errors
///
/// Returns a [`PersistenceError`] if the record can't be written.
pub fn save_orders(storage: &dyn Storage, orders: &[Order]) -> Result<(), PersistenceError> {
    write_or_remove(storage, ORDERS_KEY, orders)
}

/// Persist a signed-in session.
///
/// # Errors
///
/// Returns a [`PersistenceError`] if either record can't be written.
pub fn save_session(
    storage: &dyn Storage,
    token: &SessionToken,
    user: &User,
) -> Result<(), PersistenceError> {
    storage.set(TOKEN_KEY, token.as_str())?;

    write_record(storage, USER_KEY, user)
}

/// Forget the persisted session.
///
/// # Errors
///
/// Returns a [`PersistenceError`] if either record can't be removed.
pub fn clear_session(storage: &dyn Storage) -> Result<(), PersistenceError> {
    storage.remove(TOKEN_KEY)?;
    storage.remove(USER_KEY)?;

    Ok(())
}

/// Read the persisted session token.
///
/// # Errors
///
/// Returns a [`StorageError`] if the backend can't be read.
pub fn load_token(storage: &dyn Storage) -> Result<Option<SessionToken>, StorageError> {
    Ok(storage.get(TOKEN_KEY)?.map(SessionToken::from_string))
}

/// Everything rehydrated from durable storage at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    /// A session token was found.
    pub is_authenticated: bool,

    /// Stored user profile.
    pub user: Option<User>,

    /// Stored cart.
    pub cart: Vec<CartItem>,

    /// Stored orders.
    pub orders: Vec<Order>,
}

fn recover<T>(key: &'static str, result: Result<Option<T>, PersistenceError>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(error) => {
            warn!(key, error = %error, "discarding persisted record");

            None
        }
    }
}

/// Rehydrate persisted state. Each record is read independently; a
/// missing, unreadable or malformed record falls back to its default.
pub fn load(storage: &dyn Storage) -> PersistedState {
    let token = recover(TOKEN_KEY, load_token(storage).map_err(PersistenceError::from));

    let stored_cart: Vec<CartItem> =
        recover(CART_KEY, read_record(storage, CART_KEY)).unwrap_or_default();
    let stored_lines = stored_cart.len();
    let cart = cart::normalize(stored_cart);

    if cart.len() != stored_lines {
        warn!(
            key = CART_KEY,
            stored_lines,
            kept_lines = cart.len(),
            "dropped or merged invalid persisted cart lines"
        );
    }

    let state = PersistedState {
        is_authenticated: token.is_some(),
        user: recover(USER_KEY, read_record(storage, USER_KEY)),
        cart,
        orders: recover(ORDERS_KEY, read_record(storage, ORDERS_KEY)).unwrap_or_default(),
    };

    debug!(
        authenticated = state.is_authenticated,
        cart_lines = state.cart.len(),
        orders = state.orders.len(),
        "rehydrated persisted state"
    );

    state
}
