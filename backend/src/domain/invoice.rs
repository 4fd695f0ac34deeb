//! Invoice records and the invoice form schema.
//!
//! The form layer accepts raw string fields and produces either typed values
//! or a field-keyed error report with every failing field recorded. Amounts
//! are submitted as decimal currency strings and held as integer cents from
//! the moment they parse.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::forms::FieldErrors;

/// Message recorded against a missing or empty `customerId` field.
pub const MSG_SELECT_CUSTOMER: &str = "Please select a customer.";
/// Message recorded against a missing, unparseable, or non-positive `amount`.
pub const MSG_AMOUNT_GREATER_THAN_ZERO: &str = "Please enter an amount greater than $0.";
/// Message recorded against a missing or unrecognised `status` field.
pub const MSG_SELECT_STATUS: &str = "Please select an invoice status.";

/// Validation errors raised by the invoice newtype constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvoiceValidationError {
    /// Identifier was not a valid UUID.
    #[error("invoice id must be a valid UUID")]
    InvalidId,
    /// Customer reference was missing or blank once trimmed.
    #[error("customer reference must not be empty")]
    EmptyCustomer,
    /// Amount did not parse as a positive currency value.
    #[error("amount must be a positive currency value")]
    InvalidAmount,
    /// Status was not one of the known values.
    #[error("status must be one of: pending, paid")]
    UnknownStatus,
}

/// Stable invoice identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier already known to be a UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvoiceValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| InvoiceValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to the customer an invoice bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Validate and construct a customer reference.
    pub fn new(customer: impl AsRef<str>) -> Result<Self, InvoiceValidationError> {
        let trimmed = customer.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvoiceValidationError::EmptyCustomer);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Monetary amount held as integer cents.
///
/// ## Invariants
/// - Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AmountCents(i32);

impl AmountCents {
    /// Parse a decimal currency string, converting to cents as
    /// `round(amount * 100)`.
    pub fn parse(raw: &str) -> Result<Self, InvoiceValidationError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| InvoiceValidationError::InvalidAmount)?;
        if !value.is_finite() || value <= 0.0 {
            return Err(InvoiceValidationError::InvalidAmount);
        }
        let cents = (value * 100.0).round();
        if cents < 1.0 || cents > f64::from(i32::MAX) {
            return Err(InvoiceValidationError::InvalidAmount);
        }
        Ok(Self(cents as i32))
    }

    /// Wrap a cents value already known to be positive.
    pub fn from_cents(cents: i32) -> Result<Self, InvoiceValidationError> {
        if cents <= 0 {
            return Err(InvoiceValidationError::InvalidAmount);
        }
        Ok(Self(cents))
    }

    /// The amount in cents.
    pub fn cents(&self) -> i32 {
        self.0
    }
}

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Awaiting payment.
    Pending,
    /// Payment received.
    Paid,
}

impl InvoiceStatus {
    /// Parse a submitted status value.
    pub fn parse(raw: &str) -> Result<Self, InvoiceValidationError> {
        match raw {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(InvoiceValidationError::UnknownStatus),
        }
    }

    /// The wire/storage form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice record as persisted.
///
/// ## Invariants
/// - `amount` is strictly positive (enforced by [`AmountCents`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    id: InvoiceId,
    customer_id: CustomerId,
    amount: AmountCents,
    status: InvoiceStatus,
    date: NaiveDate,
}

impl Invoice {
    /// Assemble an invoice from validated components.
    pub fn new(
        id: InvoiceId,
        customer_id: CustomerId,
        amount: AmountCents,
        status: InvoiceStatus,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            customer_id,
            amount,
            status,
            date,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &InvoiceId {
        &self.id
    }

    /// Billed customer reference.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Amount in cents.
    pub fn amount(&self) -> AmountCents {
        self.amount
    }

    /// Payment status.
    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    /// Issue date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Raw invoice form fields as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InvoiceFormInput {
    /// Customer reference field.
    #[serde(rename = "customerId")]
    pub customer_id: Option<String>,
    /// Decimal currency amount field.
    pub amount: Option<String>,
    /// Status field (`pending` or `paid`).
    pub status: Option<String>,
}

/// Typed invoice fields produced by a successful parse.
///
/// Serves both the create path (joined with a generated id and date) and the
/// update path (applied to an existing id).
#[derive(Debug, Clone)]
pub struct InvoiceFields {
    /// Validated customer reference.
    pub customer_id: CustomerId,
    /// Amount converted to cents.
    pub amount: AmountCents,
    /// Validated status.
    pub status: InvoiceStatus,
}

impl InvoiceFields {
    /// Parse the raw field bag, collecting every failing field.
    pub fn parse(input: &InvoiceFormInput) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = match input.customer_id.as_deref().map(CustomerId::new) {
            Some(Ok(customer)) => Some(customer),
            _ => {
                errors.push("customerId", MSG_SELECT_CUSTOMER);
                None
            }
        };

        let amount = match input.amount.as_deref().map(AmountCents::parse) {
            Some(Ok(amount)) => Some(amount),
            _ => {
                errors.push("amount", MSG_AMOUNT_GREATER_THAN_ZERO);
                None
            }
        };

        let status = match input.status.as_deref().map(InvoiceStatus::parse) {
            Some(Ok(status)) => Some(status),
            _ => {
                errors.push("status", MSG_SELECT_STATUS);
                None
            }
        };

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) if errors.is_empty() => Ok(Self {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn input(customer: &str, amount: &str, status: &str) -> InvoiceFormInput {
        InvoiceFormInput {
            customer_id: Some(customer.to_owned()),
            amount: Some(amount.to_owned()),
            status: Some(status.to_owned()),
        }
    }

    #[rstest]
    #[case("10.50", 1050)]
    #[case("10", 1000)]
    #[case("0.01", 1)]
    #[case("99.999", 10000)]
    #[case(" 3.5 ", 350)]
    fn amounts_convert_to_rounded_cents(#[case] raw: &str, #[case] expected: i32) {
        let amount = AmountCents::parse(raw).expect("positive amounts parse");
        assert_eq!(amount.cents(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("0.001")]
    #[case("abc")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn non_positive_amounts_report_exact_message(#[case] raw: &str) {
        let errors = InvoiceFields::parse(&input("c1", raw, "pending"))
            .expect_err("bad amount must fail");
        assert_eq!(
            errors.messages("amount"),
            Some(&[MSG_AMOUNT_GREATER_THAN_ZERO.to_owned()][..])
        );
    }

    #[rstest]
    #[case("draft")]
    #[case("PAID")]
    #[case("")]
    fn unknown_statuses_report_exact_message(#[case] status: &str) {
        let errors = InvoiceFields::parse(&input("c1", "10.00", status))
            .expect_err("bad status must fail");
        assert_eq!(
            errors.messages("status"),
            Some(&[MSG_SELECT_STATUS.to_owned()][..])
        );
    }

    #[test]
    fn empty_customer_reports_exact_message() {
        let errors = InvoiceFields::parse(&input("   ", "10.00", "paid"))
            .expect_err("blank customer must fail");
        assert_eq!(
            errors.messages("customerId"),
            Some(&[MSG_SELECT_CUSTOMER.to_owned()][..])
        );
    }

    #[test]
    fn empty_submission_collects_every_field() {
        let errors = InvoiceFields::parse(&InvoiceFormInput::default())
            .expect_err("empty submission must fail");
        assert!(errors.messages("customerId").is_some());
        assert!(errors.messages("amount").is_some());
        assert!(errors.messages("status").is_some());
    }

    #[test]
    fn valid_submission_parses_all_fields() {
        let fields =
            InvoiceFields::parse(&input("c1", "10.50", "pending")).expect("valid form parses");
        assert_eq!(fields.customer_id.as_ref(), "c1");
        assert_eq!(fields.amount.cents(), 1050);
        assert_eq!(fields.status, InvoiceStatus::Pending);
    }

    #[test]
    fn invoice_serialises_for_the_listing_view() {
        let invoice = Invoice::new(
            InvoiceId::generate(),
            CustomerId::new("c1").expect("valid customer"),
            AmountCents::from_cents(1050).expect("positive cents"),
            InvoiceStatus::Pending,
            NaiveDate::from_ymd_opt(2025, 5, 12).expect("valid date"),
        );
        let value = serde_json::to_value(&invoice).expect("serialisable invoice");
        assert_eq!(value["customerId"], "c1");
        assert_eq!(value["amount"], 1050);
        assert_eq!(value["status"], "pending");
        assert_eq!(value["date"], "2025-05-12");
    }
}
