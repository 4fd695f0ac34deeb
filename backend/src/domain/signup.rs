//! Sign-up use-case: create the account, then sign it in.
//!
//! Generates the identifier, validates the form, hashes the password, inserts
//! the row, and immediately attempts a credential sign-in with the plaintext
//! password. Insert and sign-in are separate statements with no surrounding
//! transaction: a crash in between leaves a created-but-not-signed-in user,
//! which is accepted rather than reconciled.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::domain::auth::{DASHBOARD_PATH, LoginCredentials};
use crate::domain::forms::FormFeedback;
use crate::domain::password::hash_password;
use crate::domain::ports::{AuthService, UserRepository};
use crate::domain::user::{SignupFields, SignupFormInput, User, UserId};

const MSG_INVALID_INPUT: &str = "Invalid input. Failed to create user.";
const MSG_SIGNED_IN: &str = "User created and signed in successfully";

/// Terminal outcome of a sign-up attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// Validation failed; nothing was persisted.
    Rejected(FormFeedback),
    /// The user row exists and the sign-in succeeded.
    SignedIn {
        /// The created account, for session establishment by the caller.
        user_id: UserId,
        /// Success feedback carrying the client-side navigation target.
        feedback: FormFeedback,
    },
    /// Insert or sign-in failed after validation passed.
    ///
    /// The message embeds the underlying error text, which is inconsistent
    /// with the invoice path's non-disclosure policy; kept as-is pending a
    /// product decision.
    Failed {
        /// Failure message with the underlying error interpolated.
        message: String,
    },
}

/// Sign-up use-case over the users table and the auth port.
pub struct SignupService {
    users: Arc<dyn UserRepository>,
    auth: Arc<dyn AuthService>,
}

impl SignupService {
    /// Build the service from its collaborator ports.
    pub fn new(users: Arc<dyn UserRepository>, auth: Arc<dyn AuthService>) -> Self {
        Self { users, auth }
    }

    /// Run the full sign-up pipeline for one submission.
    ///
    /// Each call generates a fresh identifier, so identical submissions
    /// produce distinct accounts.
    pub async fn sign_up(&self, input: &SignupFormInput) -> SignupOutcome {
        let fields = match SignupFields::parse(input) {
            Ok(fields) => fields,
            Err(errors) => {
                return SignupOutcome::Rejected(FormFeedback::invalid(errors, MSG_INVALID_INPUT));
            }
        };

        let id = UserId::generate();

        let hashed = match hash_password(&fields.password) {
            Ok(hashed) => hashed,
            Err(err) => {
                warn!(error = %err, "password hashing failed during sign-up");
                return SignupOutcome::Failed {
                    message: failure_message(&err),
                };
            }
        };

        // The sign-in attempt needs the plaintext; capture it before the
        // validated fields are consumed by the row.
        let credentials =
            match LoginCredentials::try_from_parts(fields.email.as_ref(), fields.password.as_str())
            {
                Ok(credentials) => credentials,
                Err(err) => {
                    return SignupOutcome::Failed {
                        message: failure_message(&err),
                    };
                }
            };

        let user = User::new(id, fields.name, fields.email, hashed);
        if let Err(err) = self.users.insert(&user).await {
            warn!(error = %err, "user insert failed during sign-up");
            return SignupOutcome::Failed {
                message: failure_message(&err),
            };
        }

        match self.auth.sign_in(&credentials).await {
            Ok(outcome) => SignupOutcome::SignedIn {
                user_id: outcome.user_id,
                feedback: FormFeedback::from_message(MSG_SIGNED_IN).with_redirect(
                    outcome
                        .redirect_url
                        .unwrap_or_else(|| DASHBOARD_PATH.to_owned()),
                ),
            },
            Err(err) => {
                warn!(error = %err, "sign-in failed directly after sign-up");
                SignupOutcome::Failed {
                    message: failure_message(&err),
                }
            }
        }
    }
}

fn failure_message(err: &dyn fmt::Display) -> String {
    format!("Failed to create or sign in user: {err}")
}
