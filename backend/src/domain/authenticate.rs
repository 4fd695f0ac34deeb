//! Sign-in use-case mapping the auth port's failure taxonomy to form
//! feedback.
//!
//! Recognised failure kinds become fixed user-facing strings; anything
//! outside the taxonomy propagates as a domain error so the framework error
//! boundary reports it instead of the form swallowing it.

use std::sync::Arc;

use tracing::warn;

use crate::domain::auth::{DASHBOARD_PATH, LoginCredentials};
use crate::domain::error::Error;
use crate::domain::ports::{AuthError, AuthService};
use crate::domain::user::UserId;

const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials.";
const MSG_SOMETHING_WENT_WRONG: &str = "Something went wrong.";

/// Outcome of a sign-in attempt with recognised failures folded in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The credentials checked out.
    SignedIn {
        /// The authenticated account, for session establishment.
        user_id: UserId,
        /// Where the client should navigate next.
        redirect_url: String,
    },
    /// The credentials did not match a known account.
    InvalidCredentials,
    /// The auth backend reported a recognised, non-credential failure.
    Unavailable,
}

impl LoginOutcome {
    /// Fixed user-facing string for denial outcomes.
    pub fn denial_message(&self) -> Option<&'static str> {
        match self {
            Self::SignedIn { .. } => None,
            Self::InvalidCredentials => Some(MSG_INVALID_CREDENTIALS),
            Self::Unavailable => Some(MSG_SOMETHING_WENT_WRONG),
        }
    }
}

/// Sign-in use-case over the auth port.
pub struct AuthenticateAction {
    auth: Arc<dyn AuthService>,
}

impl AuthenticateAction {
    /// Build the action from the auth port.
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }

    /// Check credentials, folding recognised failures into the outcome.
    ///
    /// # Errors
    /// Returns a domain error only for failures outside the recognised
    /// taxonomy; those are re-raised rather than shown as form feedback.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<LoginOutcome, Error> {
        match self.auth.sign_in(credentials).await {
            Ok(outcome) => Ok(LoginOutcome::SignedIn {
                user_id: outcome.user_id,
                redirect_url: outcome
                    .redirect_url
                    .unwrap_or_else(|| DASHBOARD_PATH.to_owned()),
            }),
            Err(AuthError::InvalidCredentials) => Ok(LoginOutcome::InvalidCredentials),
            Err(AuthError::Backend { message }) => {
                warn!(error = %message, "auth backend failure during sign-in");
                Ok(LoginOutcome::Unavailable)
            }
            Err(AuthError::Unexpected { message }) => Err(Error::internal(message)),
        }
    }
}
