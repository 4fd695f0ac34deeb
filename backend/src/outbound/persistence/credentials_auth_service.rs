//! Credentials-backed `AuthService` adapter built on the user repository.
//!
//! Looks the account up by email and verifies the presented password against
//! the stored argon2 hash. Failures are folded into the port's taxonomy:
//! unknown accounts and wrong passwords are indistinguishable to callers,
//! repository trouble is a backend failure, and an uninterpretable stored
//! hash is unexpected and left to the error boundary.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::LoginCredentials;
use crate::domain::auth::DASHBOARD_PATH;
use crate::domain::password::verify_password;
use crate::domain::ports::{AuthError, AuthService, SignInOutcome, UserRepository};
use crate::domain::user::EmailAddress;

use super::diesel_user_repository::DieselUserRepository;

/// `AuthService` implementation checking credentials against stored hashes.
#[derive(Clone)]
pub struct CredentialsAuthService {
    users: Arc<dyn UserRepository>,
}

impl CredentialsAuthService {
    /// Create a new service backed by the Diesel user repository.
    pub fn new(users: DieselUserRepository) -> Self {
        Self {
            users: Arc::new(users),
        }
    }

    #[cfg(test)]
    fn from_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthService for CredentialsAuthService {
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInOutcome, AuthError> {
        // A syntactically invalid email cannot match any stored account.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(AuthError::InvalidCredentials);
        };

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|err| AuthError::backend(err.to_string()))?;

        let Some(user) = user else {
            return Err(AuthError::InvalidCredentials);
        };

        match verify_password(credentials.password(), user.password_hash()) {
            Ok(true) => Ok(SignInOutcome {
                user_id: *user.id(),
                redirect_url: Some(DASHBOARD_PATH.to_owned()),
            }),
            Ok(false) => Err(AuthError::InvalidCredentials),
            Err(err) => Err(AuthError::unexpected(format!(
                "stored credential verification failed: {err}"
            ))),
        }
    }
}
