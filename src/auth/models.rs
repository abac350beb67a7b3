//! Auth Models

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub id: UserUuid,

    /// Login email.
    pub email: String,

    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// College roll number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,

    /// Contact number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Access level.
    pub role: Role,

    /// Disabled accounts can't sign in.
    pub is_active: bool,
}

impl User {
    /// First and last name joined.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User Role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Enrolled student.
    #[default]
    Student,

    /// Canteen or college staff.
    Staff,

    /// Administrator.
    Admin,
}

/// Opaque session token; its presence in durable storage means signed in.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("cnt_{}", Uuid::now_v7().simple()))
    }

    /// Wrap a token read back from storage.
    #[must_use]
    pub fn from_string(token: String) -> Self {
        Self(token)
    }

    /// Raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Result of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The signed-in user.
    pub user: User,

    /// Token to keep in durable storage.
    pub token: SessionToken,
}

/// Login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Login email.
    pub email: String,

    /// Plain-text password.
    pub password: String,
}

impl Credentials {
    /// Build credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Signup form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Given name.
    pub first_name: String,

    /// Family name.
    pub last_name: String,

    /// Login email.
    pub email: String,

    /// College roll number.
    pub student_id: String,

    /// Optional contact number.
    pub phone: Option<String>,

    /// Chosen password.
    pub password: String,

    /// Password typed a second time.
    pub confirm_password: String,

    /// Terms and conditions accepted.
    pub agree_to_terms: bool,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("student_id", &self.student_id)
            .field("phone", &self.phone)
            .field("agree_to_terms", &self.agree_to_terms)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let credentials = Credentials::new("asha@licet.ac.in", "hunter22");
        let token = SessionToken::generate();

        assert!(!format!("{credentials:?}").contains("hunter22"));
        assert!(!format!("{token:?}").contains(token.as_str()));
    }

    #[test]
    fn generated_tokens_are_unique() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }
}
