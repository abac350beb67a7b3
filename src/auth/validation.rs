//! Signup form checks, run before anything is sent to the identity service.

use crate::auth::{errors::RegistrationError, models::Registration};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

impl Registration {
    /// Check the form in the order the signup screen reports problems:
    /// profile fields, password fields, confirmation, length, terms.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] found.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let profile = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.student_id,
        ];

        if profile.iter().any(|field| field.trim().is_empty()) {
            return Err(RegistrationError::MissingRequiredFields);
        }

        if self.password.is_empty() || self.confirm_password.is_empty() {
            return Err(RegistrationError::MissingRequiredFields);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort);
        }

        if !self.agree_to_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }

        Ok(())
    }
}
