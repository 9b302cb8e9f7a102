//! Transaction data models and API request types.
//!
//! This module defines:
//! - `Transaction`: Database entity representing a ledger entry
//! - `TransactionType`: The expense/revenue enumeration
//! - `TransactionPayload`: Request body for create and update operations
//! - The field validation rules applied before any persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// Minimum number of characters in a transaction title.
pub const TITLE_MIN_CHARS: usize = 3;

/// Inclusive bounds for a transaction amount (one to seven digits).
pub const AMOUNT_MIN: i64 = 1;
pub const AMOUNT_MAX: i64 = 9_999_999;

/// The two supported kinds of ledger entry.
///
/// Stored in SQL and serialized in JSON as the lowercase string
/// (`"expense"` / `"revenue"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Revenue,
}

impl TransactionType {
    /// Parse a raw request value, `None` if it is not a supported kind.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "expense" => Some(Self::Expense),
            "revenue" => Some(Self::Revenue),
            _ => None,
        }
    }
}

/// Represents a transaction record from the database.
///
/// # Database Table
///
/// Maps to the `transactions` table. Each transaction:
/// - Has a store-assigned auto-increment identifier, immutable thereafter
/// - Records a title, a positive amount, and an expense/revenue kind
/// - Carries the ledger `time` used for ordered listing, plus bookkeeping
///   timestamps
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "title": "Groceries",
///   "amount": 5000,
///   "type": "expense",
///   "time": "2025-08-07T12:00:00Z",
///   "created_at": "2025-08-07T12:00:00Z",
///   "updated_at": "2025-08-07T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store at creation
    pub id: i64,

    /// Human-readable title, at least three characters
    pub title: String,

    /// Amount as a positive integer, one to seven digits
    pub amount: i64,

    /// Kind of ledger entry (expense or revenue)
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Ledger timestamp; set by the server at creation when the client
    /// omits it, never touched by updates
    pub time: DateTime<Utc>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a transaction.
///
/// All fields are optional at the deserialization layer so that missing
/// values surface as per-field validation messages instead of a body-level
/// decode failure.
///
/// # JSON Example
///
/// ```json
/// {
///   "title": "Groceries",
///   "amount": 5000,
///   "type": "expense"
/// }
/// ```
///
/// # Validation
///
/// - `title`: required, at least 3 characters
/// - `amount`: required, between 1 and 9,999,999
/// - `type`: required, one of `expense` / `revenue`
/// - `time`: optional; only honored by the create operation
#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    pub title: Option<String>,

    pub amount: Option<i64>,

    #[serde(rename = "type")]
    pub transaction_type: Option<String>,

    pub time: Option<DateTime<Utc>>,
}

/// A payload that has passed validation.
///
/// Create and update share one rule set; the update path simply ignores
/// `time`.
#[derive(Debug, Clone)]
pub struct ValidTransaction {
    pub title: String,
    pub amount: i64,
    pub transaction_type: TransactionType,
    pub time: Option<DateTime<Utc>>,
}

impl TransactionPayload {
    /// Validate the payload, producing either the typed fields or the full
    /// map of per-field failure messages.
    ///
    /// Every rule runs even after an earlier field has failed, so a single
    /// response reports all problems at once.
    pub fn validate(self) -> Result<ValidTransaction, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        match self.title.as_deref() {
            None | Some("") => errors.add("title", "The title field is required."),
            Some(title) if title.chars().count() < TITLE_MIN_CHARS => {
                errors.add("title", "The title must be at least 3 characters.");
            }
            Some(_) => {}
        }

        match self.amount {
            None => errors.add("amount", "The amount field is required."),
            Some(amount) if !(AMOUNT_MIN..=AMOUNT_MAX).contains(&amount) => {
                errors.add("amount", "Amount must be a number");
            }
            Some(_) => {}
        }

        let transaction_type = match self.transaction_type.as_deref() {
            None => {
                errors.add("type", "The type field is required.");
                None
            }
            Some(raw) => {
                let parsed = TransactionType::parse(raw);
                if parsed.is_none() {
                    errors.add("type", "The selected type is invalid.");
                }
                parsed
            }
        };

        match (self.title, self.amount, transaction_type) {
            (Some(title), Some(amount), Some(transaction_type)) if errors.is_empty() => {
                Ok(ValidTransaction {
                    title,
                    amount,
                    transaction_type,
                    time: self.time,
                })
            }
            _ => Err(errors),
        }
    }
}
