//! Form submission outcomes shared by every mutation action.
//!
//! A form submission either parses into typed field values or produces a
//! field-keyed error report. The report maps each field name to the ordered
//! list of messages raised for it, alongside a summary message, and is what
//! flows back to the form for display.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Field-keyed validation error report.
///
/// Keys are the form field names as submitted (`customerId`, `amount`, ...);
/// values keep the order in which messages were raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// True when no field has any recorded message.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, if any.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Feedback payload returned to the submitting form.
///
/// Mirrors the two-channel shape of the mutation actions: a failed validation
/// carries `errors` plus a summary `message`; a persistence failure or a
/// success carries `message` alone; sign-up success additionally carries the
/// redirect target for the client to navigate to.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormFeedback {
    /// Field-keyed validation messages, present only on validation failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
    /// Summary message for the form.
    pub message: String,
    /// Navigation target for the client, when the action yields one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl FormFeedback {
    /// Feedback for a failed validation: the full error report plus summary.
    pub fn invalid(errors: FieldErrors, message: impl Into<String>) -> Self {
        Self {
            errors: Some(errors),
            message: message.into(),
            redirect_url: None,
        }
    }

    /// Feedback carrying a message only.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            errors: None,
            message: message.into(),
            redirect_url: None,
        }
    }

    /// Attach a navigation target for the client.
    pub fn with_redirect(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_message_order_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("amount", "first");
        errors.push("amount", "second");
        assert_eq!(
            errors.messages("amount"),
            Some(&["first".to_owned(), "second".to_owned()][..])
        );
    }

    #[test]
    fn serialises_as_field_keyed_lists() {
        let mut errors = FieldErrors::new();
        errors.push("email", "Invalid email format.");
        let feedback = FormFeedback::invalid(errors, "Invalid input. Failed to create user.");
        let value = serde_json::to_value(&feedback).expect("serialisable feedback");
        assert_eq!(value["errors"]["email"][0], "Invalid email format.");
        assert_eq!(value["message"], "Invalid input. Failed to create user.");
        assert!(value.get("redirectUrl").is_none());
    }

    #[test]
    fn message_only_feedback_omits_errors() {
        let value = serde_json::to_value(FormFeedback::from_message("Deleted Invoice"))
            .expect("serialisable feedback");
        assert!(value.get("errors").is_none());
        assert_eq!(value["message"], "Deleted Invoice");
    }

    #[test]
    fn redirect_target_uses_camel_case_key() {
        let feedback =
            FormFeedback::from_message("User created and signed in successfully")
                .with_redirect("/dashboard");
        let value = serde_json::to_value(&feedback).expect("serialisable feedback");
        assert_eq!(value["redirectUrl"], "/dashboard");
    }
}
