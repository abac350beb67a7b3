//! Sign-in, signup and sign-out.

use std::{fmt, sync::Arc};

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        AuthenticatedUser, Credentials, IdentityService, IdentityServiceError, Registration,
        RegistrationError, User,
    },
    facades::calls::{CallError, CallPolicy, CancelSignal, guarded},
    store::{Store, persistence},
};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";

/// Errors returned by [`Session`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// Email or password left blank.
    #[error("Please enter your email and password")]
    MissingCredentials,

    /// The signup form failed local checks.
    #[error(transparent)]
    Invalid(#[from] RegistrationError),

    /// The identity service call failed.
    #[error("identity service call failed: {0}")]
    Identity(#[from] CallError<IdentityServiceError>),
}

/// Session operations over the store and an [`IdentityService`].
pub struct Session {
    store: Arc<Store>,
    identity: Arc<dyn IdentityService>,
    policy: CallPolicy,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session facade.
    pub fn new(store: Arc<Store>, identity: Arc<dyn IdentityService>, policy: CallPolicy) -> Self {
        Self {
            store,
            identity,
            policy,
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingCredentials`] for blank fields, without
    /// calling the identity service, and [`SessionError::Identity`] when the
    /// service rejects the credentials, times out or is cancelled.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(
        &self,
        credentials: Credentials,
        cancel: &CancelSignal,
    ) -> Result<User, SessionError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(self.reject(SessionError::MissingCredentials));
        }

        self.store.set_loading(true);
        self.store.set_error(None);

        let result = guarded(self.policy, cancel, self.identity.authenticate(&credentials)).await;

        let outcome = match result {
            Ok(signed_in) => Ok(self.begin(signed_in)),
            Err(error) => {
                warn!(error = %error, "login failed");
                self.store.set_error(Some(LOGIN_FAILED.to_string()));

                Err(error.into())
            }
        };

        self.store.set_loading(false);

        outcome
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Invalid`] when the form fails local checks,
    /// without calling the identity service or touching storage, and
    /// [`SessionError::Identity`] when the service call fails.
    #[instrument(skip_all, fields(email = %registration.email))]
    pub async fn signup(
        &self,
        registration: Registration,
        cancel: &CancelSignal,
    ) -> Result<User, SessionError> {
        if let Err(invalid) = registration.validate() {
            return Err(self.reject(invalid.into()));
        }

        self.store.set_loading(true);
        self.store.set_error(None);

        let result = guarded(self.policy, cancel, self.identity.register(&registration)).await;

        let outcome = match result {
            Ok(registered) => Ok(self.begin(registered)),
            Err(error) => {
                warn!(error = %error, "signup failed");
                self.store.set_error(Some(SIGNUP_FAILED.to_string()));

                Err(error.into())
            }
        };

        self.store.set_loading(false);

        outcome
    }

    /// Sign out, forgetting the session, the cart and the orders.
    #[instrument(skip_all)]
    pub fn logout(&self) {
        if let Err(error) = persistence::clear_session(self.store.storage()) {
            warn!(error = %error, "failed to clear persisted session");
        }

        self.store.logout();

        info!("signed out");
    }

    /// Re-read the persisted token and refresh the authenticated flag.
    #[instrument(skip_all)]
    pub fn check_auth(&self) -> bool {
        let is_authenticated = match persistence::load_token(self.store.storage()) {
            Ok(token) => token.is_some(),
            Err(error) => {
                warn!(error = %error, "failed to read persisted session token");

                false
            }
        };

        self.store.set_authenticated(is_authenticated);

        is_authenticated
    }

    fn reject(&self, error: SessionError) -> SessionError {
        self.store.set_error(Some(error.to_string()));

        error
    }

    fn begin(&self, AuthenticatedUser { user, token }: AuthenticatedUser) -> User {
        if let Err(error) = persistence::save_session(self.store.storage(), &token, &user) {
            warn!(error = %error, "failed to persist session");
        }

        self.store.set_user(user.clone());
        self.store.set_authenticated(true);

        info!(user_id = %user.id, "signed in");

        user
    }
}
