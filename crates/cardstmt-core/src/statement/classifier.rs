//! Statement classification: detection, per-field extraction, and status.

use tracing::debug;

use crate::error::TextExtractionError;
use crate::models::statement::{ParsingStatus, StatementRecord};

use super::detector::IssuerDetector;
use super::extractor::FieldExtractor;
use super::registry::{IssuerProfile, IssuerRegistry};

/// Turns the outcome of text extraction into a finished [`StatementRecord`].
pub struct StatementClassifier<'r> {
    detector: IssuerDetector<'r>,
    extractor: FieldExtractor,
}

impl<'r> StatementClassifier<'r> {
    pub fn new(registry: &'r IssuerRegistry) -> Self {
        Self {
            detector: IssuerDetector::new(registry),
            extractor: FieldExtractor::new(),
        }
    }

    /// Classify a document given the result of extracting its text.
    ///
    /// A failed extraction short-circuits to an `error` record carrying the
    /// failure message; detection and field extraction are skipped.
    pub fn classify(
        &self,
        file_name: &str,
        text: Result<&str, &TextExtractionError>,
    ) -> StatementRecord {
        match text {
            Ok(text) => self.classify_text(file_name, text),
            Err(e) => {
                debug!("{}: text extraction failed: {}", file_name, e);
                StatementRecord::extraction_error(file_name, e.to_string())
            }
        }
    }

    /// Classify a document from its extracted text.
    pub fn classify_text(&self, file_name: &str, text: &str) -> StatementRecord {
        match self.detector.identify(text) {
            Some(profile) => self.extract_profile(file_name, profile, text),
            None => StatementRecord::unidentified(file_name),
        }
    }

    /// Run every field the profile defines and assign the status.
    fn extract_profile(
        &self,
        file_name: &str,
        profile: &IssuerProfile,
        text: &str,
    ) -> StatementRecord {
        let mut record = StatementRecord::new(file_name, profile.name());

        for (field, patterns) in profile.fields() {
            match self.extractor.extract(text, patterns) {
                Some(value) => record.set(field, value),
                None => record.errors.push(format!("could not extract {}", field)),
            }
        }

        record.parsing_status = status_of(&record);

        debug!(
            "{}: {} -> {} ({} of {} fields)",
            file_name,
            record.issuer,
            record.parsing_status,
            record.extracted_fields().count(),
            profile.field_count()
        );

        record
    }
}

/// Status of a record whose issuer was identified.
fn status_of(record: &StatementRecord) -> ParsingStatus {
    if record.errors.is_empty() {
        ParsingStatus::Success
    } else if !record.has_critical_field() {
        ParsingStatus::Failed
    } else {
        ParsingStatus::Partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::Field;
    use crate::statement::registry::IssuerDefinition;
    use pretty_assertions::assert_eq;

    /// Profile with 3 critical and 5 optional fields, each keyed by its label.
    fn labeled_registry() -> IssuerRegistry {
        let def = Field::ALL.into_iter().fold(
            IssuerDefinition::new("Label Bank", &[r"Label\s+Bank"]),
            |def, field| {
                let pattern = format!(r"{}:\s*(\S+)", field.as_str());
                def.field(field, &[pattern.as_str()])
            },
        );
        IssuerRegistry::from_definitions([def]).unwrap()
    }

    fn classify(registry: &IssuerRegistry, text: &str) -> StatementRecord {
        StatementClassifier::new(registry).classify("doc.pdf", Ok(text))
    }

    #[test]
    fn test_no_fields_matched_is_failed() {
        let registry = labeled_registry();
        let record = classify(&registry, "Label Bank statement");

        assert_eq!(record.issuer, "Label Bank");
        assert_eq!(record.parsing_status, ParsingStatus::Failed);
        assert_eq!(record.errors.len(), 8);
        assert_eq!(record.errors[0], "could not extract card_number");
        assert_eq!(record.errors[7], "could not extract previous_balance");
    }

    #[test]
    fn test_one_critical_field_is_partial() {
        let registry = labeled_registry();
        let record = classify(&registry, "Label Bank\npayment_due_date: 05/01/2025");

        assert_eq!(record.parsing_status, ParsingStatus::Partial);
        assert_eq!(record.payment_due_date.as_deref(), Some("05/01/2025"));
        assert_eq!(record.errors.len(), 7);
    }

    #[test]
    fn test_optional_fields_only_is_failed() {
        let registry = labeled_registry();
        let record = classify(&registry, "Label Bank\ncredit_limit: 5000\nstatement_date: 01/01");

        assert_eq!(record.parsing_status, ParsingStatus::Failed);
        assert_eq!(record.credit_limit.as_deref(), Some("5000"));
    }

    #[test]
    fn test_all_fields_matched_is_success() {
        let registry = labeled_registry();
        let text: String = Field::ALL
            .iter()
            .map(|f| format!("{}: v{}\n", f.as_str(), f.as_str().len()))
            .collect();
        let record = classify(&registry, &format!("Label Bank\n{}", text));

        assert_eq!(record.parsing_status, ParsingStatus::Success);
        assert!(record.errors.is_empty());
        assert_eq!(record.extracted_fields().count(), 8);
        assert_eq!(record.card_number.as_deref(), Some("v11"));
    }

    #[test]
    fn test_success_only_needs_defined_fields() {
        let registry = IssuerRegistry::from_definitions([IssuerDefinition::new("Mini", &["Mini"])
            .field(Field::TotalAmountDue, &[r"Due\s+(\S+)"])])
        .unwrap();
        let record = classify(&registry, "Mini card. Due 10.00");

        assert_eq!(record.parsing_status, ParsingStatus::Success);
        assert_eq!(record.card_number, None);
    }

    #[test]
    fn test_unidentified_issuer() {
        let registry = labeled_registry();
        let record = classify(&registry, "payment_due_date: 05/01/2025");

        assert_eq!(record.issuer, "Unknown");
        assert_eq!(record.parsing_status, ParsingStatus::Failed);
        assert_eq!(record.errors, vec!["could not identify issuer".to_string()]);
        assert_eq!(record.payment_due_date, None);
    }

    #[test]
    fn test_extraction_failure_short_circuits() {
        let registry = labeled_registry();
        let err = TextExtractionError::Encrypted;
        let record = StatementClassifier::new(&registry).classify("locked.pdf", Err(&err));

        assert_eq!(record.file_name, "locked.pdf");
        assert_eq!(record.issuer, "Error");
        assert_eq!(record.parsing_status, ParsingStatus::Error);
        assert_eq!(record.errors, vec!["PDF is encrypted".to_string()]);
    }

    #[test]
    fn test_icici_end_to_end() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "ICICI Bank Credit Card Statement\n\
                    Total Amount due: Rs. 12,345.67\n\
                    Payment Due Date: 05 Jan, 2025\n";
        let record = classify(&registry, text);

        assert_eq!(record.issuer, "ICICI Bank");
        assert_eq!(record.total_amount_due.as_deref(), Some("12,345.67"));
        assert_eq!(record.payment_due_date.as_deref(), Some("05 Jan, 2025"));
        assert_eq!(record.card_number, None);
        assert_eq!(record.parsing_status, ParsingStatus::Partial);
        assert!(record.errors.contains(&"could not extract card_number".to_string()));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["parsing_status"], "partial");
        assert_eq!(json["card_number"], serde_json::Value::Null);
    }

    #[test]
    fn test_axis_full_statement() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "\
Axis Bank Credit Card Statement
Card No: 53346500****1234
Statement Generation Date: 12/03/2025
Payment Due Date: 01/04/2025
Total Payment Due: 23,456.00 Dr
Minimum Payment Due: 1,173.00 Dr
Credit Limit: 2,00,000.00
Available Credit Limit: 1,76,544.00
Previous Balance: - 10,000.00 Dr
";
        let record = classify(&registry, text);

        assert_eq!(record.parsing_status, ParsingStatus::Success, "{:?}", record.errors);
        assert_eq!(record.card_number.as_deref(), Some("53346500****1234"));
        assert_eq!(record.statement_date.as_deref(), Some("12/03/2025"));
        assert_eq!(record.total_amount_due.as_deref(), Some("23,456.00"));
        assert_eq!(record.minimum_amount_due.as_deref(), Some("1,173.00"));
        assert_eq!(record.credit_limit.as_deref(), Some("2,00,000.00"));
        assert_eq!(record.available_credit.as_deref(), Some("1,76,544.00"));
        assert_eq!(record.previous_balance.as_deref(), Some("10,000.00"));
    }

    // Range patterns take the last group, so the period END date is
    // reported as the statement date for these issuers.

    #[test]
    fn test_axis_period_range_yields_end_date() {
        let registry = IssuerRegistry::builtin().unwrap();
        let record = classify(&registry, "Axis Bank\nPeriod 13/02/2025 - 12/03/2025");
        assert_eq!(record.statement_date.as_deref(), Some("12/03/2025"));
    }

    #[test]
    fn test_idfc_period_range_yields_end_date() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "IDFC FIRST Bank\n\
                    Statement Period 15/12/2024 - 14/01/2025\n\
                    Card Number: XXXX 9876\n\
                    Total Amount Due: r5,120.50\n";
        let record = classify(&registry, text);

        assert_eq!(record.statement_date.as_deref(), Some("14/01/2025"));
        assert_eq!(record.card_number.as_deref(), Some("9876"));
        assert_eq!(record.total_amount_due.as_deref(), Some("5,120.50"));
        assert_eq!(record.parsing_status, ParsingStatus::Partial);
    }

    #[test]
    fn test_rbl_period_range_yields_end_date() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "RBL Bank\n01/01/2025 to 31/01/2025\nCard 5241 XXXX XXXX 7788\nImmediate05/02/2025";
        let record = classify(&registry, text);

        assert_eq!(record.statement_date.as_deref(), Some("31/01/2025"));
        assert_eq!(record.card_number.as_deref(), Some("5241 XXXX XXXX 7788"));
        assert_eq!(record.payment_due_date.as_deref(), Some("05/02/2025"));
    }

    #[test]
    fn test_rbl_summary_column_takes_second_figure() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "RBL Bank\n4,500.00\n12,340.00\n0.00\n";
        let record = classify(&registry, text);
        assert_eq!(record.total_amount_due.as_deref(), Some("12,340.00"));
    }

    #[test]
    fn test_american_express_statement() {
        let registry = IssuerRegistry::builtin().unwrap();
        let text = "\
americanexpress.com
Account Ending 1-23456
Closing Date 02/14/25
Payment Due Date 03/11/25
New Balance $1,234.56
Minimum Payment Due $40.00
Previous Balance $980.10
";
        let record = classify(&registry, text);

        assert_eq!(record.issuer, "American Express");
        assert_eq!(record.card_number.as_deref(), Some("1-23456"));
        assert_eq!(record.statement_date.as_deref(), Some("02/14/25"));
        assert_eq!(record.payment_due_date.as_deref(), Some("03/11/25"));
        assert_eq!(record.total_amount_due.as_deref(), Some("1,234.56"));
        assert_eq!(
            record.errors,
            vec![
                "could not extract credit_limit".to_string(),
                "could not extract available_credit".to_string(),
            ]
        );
        assert_eq!(record.parsing_status, ParsingStatus::Partial);
    }
}
