//! Driving port for credential sign-in.
//!
//! Inbound adapters and the sign-up flow authenticate through this port
//! without knowing the backing implementation, which keeps handler tests
//! deterministic: they substitute a test double instead of wiring storage.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::user::UserId;

/// Failure taxonomy reported by auth adapters.
///
/// The first two kinds are recognised and mapped to fixed user-facing
/// strings by the sign-in action; [`AuthError::Unexpected`] is deliberately
/// not handled there and propagates to the framework error boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The presented credentials do not match a known account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The auth backend was reachable but reported a failure.
    #[error("authentication backend failure: {message}")]
    Backend {
        /// Adapter-provided failure detail.
        message: String,
    },
    /// A failure outside the recognised taxonomy.
    #[error("unexpected authentication failure: {message}")]
    Unexpected {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl AuthError {
    /// Create a backend error with the given message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create an unexpected error with the given message.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    /// The authenticated account.
    pub user_id: UserId,
    /// Navigation target offered to the client, when the adapter yields one.
    pub redirect_url: Option<String>,
}

/// Domain use-case port for credential authentication.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check the credentials and return the authenticated identity.
    async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SignInOutcome, AuthError>;
}
