//! Statement record model shared by the classifier and every renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Issuer sentinel for documents no profile recognized.
pub const UNKNOWN_ISSUER: &str = "Unknown";

/// Issuer sentinel for documents whose text could not be extracted.
pub const ERROR_ISSUER: &str = "Error";

/// Diagnostic recorded when no issuer profile matches.
pub const UNIDENTIFIED_DIAGNOSTIC: &str = "could not identify issuer";

/// A statement field an issuer profile may define.
///
/// Variant order is the canonical field order; profiles are extracted and
/// diagnostics are reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CardNumber,
    StatementDate,
    PaymentDueDate,
    TotalAmountDue,
    MinimumAmountDue,
    CreditLimit,
    AvailableCredit,
    PreviousBalance,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 8] = [
        Field::CardNumber,
        Field::StatementDate,
        Field::PaymentDueDate,
        Field::TotalAmountDue,
        Field::MinimumAmountDue,
        Field::CreditLimit,
        Field::AvailableCredit,
        Field::PreviousBalance,
    ];

    /// Fields whose joint absence turns a recognized statement into a failure.
    pub const CRITICAL: [Field; 3] = [
        Field::CardNumber,
        Field::TotalAmountDue,
        Field::PaymentDueDate,
    ];

    /// Snake-case name used in JSON output and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::CardNumber => "card_number",
            Field::StatementDate => "statement_date",
            Field::PaymentDueDate => "payment_due_date",
            Field::TotalAmountDue => "total_amount_due",
            Field::MinimumAmountDue => "minimum_amount_due",
            Field::CreditLimit => "credit_limit",
            Field::AvailableCredit => "available_credit",
            Field::PreviousBalance => "previous_balance",
        }
    }

    /// Human-readable label for text summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Field::CardNumber => "Card Number",
            Field::StatementDate => "Statement Date",
            Field::PaymentDueDate => "Payment Due Date",
            Field::TotalAmountDue => "Total Amount Due",
            Field::MinimumAmountDue => "Minimum Amount Due",
            Field::CreditLimit => "Credit Limit",
            Field::AvailableCredit => "Available Credit",
            Field::PreviousBalance => "Previous Balance",
        }
    }

    /// Whether this field belongs to the critical set.
    pub fn is_critical(&self) -> bool {
        Self::CRITICAL.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Outcome of parsing one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsingStatus {
    /// Issuer identified and every configured field extracted.
    Success,
    /// Issuer identified, at least one critical field present, some fields missing.
    Partial,
    /// Issuer unidentified, or no critical field extracted.
    Failed,
    /// The text extraction collaborator failed.
    Error,
}

impl ParsingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParsingStatus::Success => "success",
            ParsingStatus::Partial => "partial",
            ParsingStatus::Failed => "failed",
            ParsingStatus::Error => "error",
        }
    }
}

impl fmt::Display for ParsingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed data for a single statement document.
///
/// Serialized field order is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Document identifier (file name).
    pub file_name: String,

    /// Issuer name, or `Unknown` / `Error`.
    pub issuer: String,

    pub card_number: Option<String>,
    pub statement_date: Option<String>,
    pub payment_due_date: Option<String>,
    pub total_amount_due: Option<String>,
    pub minimum_amount_due: Option<String>,
    pub credit_limit: Option<String>,
    pub available_credit: Option<String>,
    pub previous_balance: Option<String>,

    /// Classification of this document.
    pub parsing_status: ParsingStatus,

    /// Diagnostics in the order they were produced.
    pub errors: Vec<String>,
}

impl StatementRecord {
    /// Create an empty record for a recognized issuer.
    pub(crate) fn new(file_name: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            issuer: issuer.into(),
            card_number: None,
            statement_date: None,
            payment_due_date: None,
            total_amount_due: None,
            minimum_amount_due: None,
            credit_limit: None,
            available_credit: None,
            previous_balance: None,
            parsing_status: ParsingStatus::Success,
            errors: Vec::new(),
        }
    }

    /// Record for a document whose text could not be extracted.
    pub(crate) fn extraction_error(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        let mut record = Self::new(file_name, ERROR_ISSUER);
        record.parsing_status = ParsingStatus::Error;
        record.errors.push(message.into());
        record
    }

    /// Record for a document no issuer profile recognized.
    pub(crate) fn unidentified(file_name: impl Into<String>) -> Self {
        let mut record = Self::new(file_name, UNKNOWN_ISSUER);
        record.parsing_status = ParsingStatus::Failed;
        record.errors.push(UNIDENTIFIED_DIAGNOSTIC.to_string());
        record
    }

    /// Get the value of a field.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::CardNumber => &self.card_number,
            Field::StatementDate => &self.statement_date,
            Field::PaymentDueDate => &self.payment_due_date,
            Field::TotalAmountDue => &self.total_amount_due,
            Field::MinimumAmountDue => &self.minimum_amount_due,
            Field::CreditLimit => &self.credit_limit,
            Field::AvailableCredit => &self.available_credit,
            Field::PreviousBalance => &self.previous_balance,
        };
        value.as_deref()
    }

    pub(crate) fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::CardNumber => &mut self.card_number,
            Field::StatementDate => &mut self.statement_date,
            Field::PaymentDueDate => &mut self.payment_due_date,
            Field::TotalAmountDue => &mut self.total_amount_due,
            Field::MinimumAmountDue => &mut self.minimum_amount_due,
            Field::CreditLimit => &mut self.credit_limit,
            Field::AvailableCredit => &mut self.available_credit,
            Field::PreviousBalance => &mut self.previous_balance,
        };
        *slot = Some(value);
    }

    /// Fields with a value, in canonical order.
    pub fn extracted_fields(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|value| (field, value)))
    }

    /// True if at least one critical field was extracted.
    pub fn has_critical_field(&self) -> bool {
        Field::CRITICAL.iter().any(|field| self.get(*field).is_some())
    }
}

/// Per-status counts over a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
    pub error: usize,
}

impl BatchSummary {
    /// Count statuses over a result set.
    pub fn from_records(records: &[StatementRecord]) -> Self {
        records.iter().fold(Self::default(), |mut summary, record| {
            summary.total += 1;
            match record.parsing_status {
                ParsingStatus::Success => summary.success += 1,
                ParsingStatus::Partial => summary.partial += 1,
                ParsingStatus::Failed => summary.failed += 1,
                ParsingStatus::Error => summary.error += 1,
            }
            summary
        })
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {} | Success: {} | Partial: {} | Failed: {} | Error: {}",
            self.total, self.success, self.partial, self.failed, self.error
        )
    }
}
