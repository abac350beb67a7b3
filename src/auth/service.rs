//! Identity service.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use tokio::sync::RwLock;

use crate::auth::{
    errors::IdentityServiceError,
    models::{AuthenticatedUser, Credentials, Registration, Role, SessionToken, User, UserUuid},
};

/// Demo account seeded by [`InMemoryIdentityService::with_demo_account`].
pub const DEMO_EMAIL: &str = "student@licet.ac.in";

/// Password of the demo account.
pub const DEMO_PASSWORD: &str = "password123";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user: User,
}

/// Identity service keeping accounts in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityService {
    latency: Duration,
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryIdentityService {
    /// Create an empty service that waits `latency` before every answer.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            accounts: Arc::default(),
        }
    }

    /// Create a service holding a single demo student account.
    #[must_use]
    pub fn with_demo_account(latency: Duration) -> Self {
        let user = User {
            id: UserUuid::new(),
            email: DEMO_EMAIL.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            student_id: Some("STU001".to_string()),
            phone: Some("+91 98765 43210".to_string()),
            role: Role::Student,
            is_active: true,
        };

        let accounts = HashMap::from([(
            normalize_email(DEMO_EMAIL),
            Account {
                password: DEMO_PASSWORD.to_string(),
                user,
            },
        )]);

        Self {
            latency,
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityServiceError> {
        tokio::time::sleep(self.latency).await;

        let accounts = self.accounts.read().await;

        let account = accounts
            .get(&normalize_email(&credentials.email))
            .filter(|account| account.password == credentials.password)
            .ok_or(IdentityServiceError::InvalidCredentials)?;

        if !account.user.is_active {
            return Err(IdentityServiceError::Inactive);
        }

        Ok(AuthenticatedUser {
            user: account.user.clone(),
            token: SessionToken::generate(),
        })
    }

    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<AuthenticatedUser, IdentityServiceError> {
        tokio::time::sleep(self.latency).await;

        let key = normalize_email(&registration.email);

        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&key) {
            return Err(IdentityServiceError::AlreadyRegistered);
        }

        let user = User {
            id: UserUuid::new(),
            email: registration.email.trim().to_string(),
            first_name: registration.first_name.trim().to_string(),
            last_name: registration.last_name.trim().to_string(),
            student_id: non_blank(Some(&registration.student_id)),
            phone: non_blank(registration.phone.as_ref()),
            role: Role::Student,
            is_active: true,
        };

        accounts.insert(
            key,
            Account {
                password: registration.password.clone(),
                user: user.clone(),
            },
        );

        Ok(AuthenticatedUser {
            user,
            token: SessionToken::generate(),
        })
    }
}

/// Authentication backend.
#[automock]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Sign in with email and password.
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedUser, IdentityServiceError>;

    /// Create an account from a validated signup form and sign it in.
    async fn register(
        &self,
        registration: &Registration,
    ) -> Result<AuthenticatedUser, IdentityServiceError>;
}
