//! Auth errors.

use thiserror::Error;

/// Local signup form checks. Messages are shown to the user as-is.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// A profile field or password field was left blank.
    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the minimum length.
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    /// Terms and conditions not accepted.
    #[error("Please agree to the terms and conditions")]
    TermsNotAccepted,
}

/// Errors returned by an [`IdentityService`](super::IdentityService).
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The account exists but has been disabled.
    #[error("account is inactive")]
    Inactive,

    /// Signup with an email that is already registered.
    #[error("email already registered")]
    AlreadyRegistered,

    /// The identity service could not be reached.
    #[error("identity service unavailable")]
    Unavailable,
}
