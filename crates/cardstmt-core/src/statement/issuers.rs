//! Built-in issuer profiles.
//!
//! Profiles are listed in detection priority order. Identifier patterns
//! overlap on purpose (brand name, web domain, regulatory ID) so a profile
//! still matches when one of them drifts out of the template.

use crate::models::statement::Field;

use super::registry::IssuerDefinition;

/// Definitions of every built-in issuer, in priority order.
pub fn builtin_definitions() -> Vec<IssuerDefinition> {
    vec![icici(), axis(), idfc_first(), rbl(), american_express()]
}

fn icici() -> IssuerDefinition {
    IssuerDefinition::new(
        "ICICI Bank",
        &[r"ICICI\s+Bank", r"icicibank\.com", r"CIN.*L65190GJ1994PLC021012"],
    )
    .field(Field::CardNumber, &[r"(\d{4}[X]{8}\d{4})", r"(\d{16})"])
    .field(
        Field::StatementDate,
        &[
            r"STATEMENT\s+DATE[:\s]*(\d{1,2}\s+\w+,?\s+\d{4})",
            r"Statement\s+period\s*:.*to\s+(\w+\s+\d{1,2},\s+\d{4})",
        ],
    )
    .field(
        Field::PaymentDueDate,
        &[
            r"PAYMENT\s+DUE\s+DATE[:\s]*(\d{1,2}\s+\w+,?\s+\d{4})",
            r"Payment\s+Due\s+Date[:\s]*(\w+\s+\d{1,2},\s+\d{4})",
        ],
    )
    .field(
        Field::TotalAmountDue,
        &[
            r"Total\s+Amount\s+due[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
            r"Total\s+Payment\s+Due[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::MinimumAmountDue,
        &[
            r"Minimum\s+Amount\s+due[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
            r"Minimum\s+Payment\s+Due[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::CreditLimit,
        &[
            r"Credit\s+Limit\s*\(Including\s+cash\)[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
            r"Credit\s+Limit[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::AvailableCredit,
        &[r"Available\s+Credit\s*\(Including\s+cash\)[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})"],
    )
    .field(
        Field::PreviousBalance,
        &[r"Previous\s+Balance[:\s]*[₹`Rs\.?\s]*([0-9,]+\.?\d{0,2})"],
    )
}

fn axis() -> IssuerDefinition {
    IssuerDefinition::new(
        "Axis Bank",
        &[r"Axis\s+Bank", r"axisbank\.com", r"AAACU2414K3ZD"],
    )
    .field(
        Field::CardNumber,
        &[
            r"Card\s+No[:\s]*(\d{8}\*{4}\d{4})",
            r"Card\s+No[:\s]*(\d{14}\*{4}\d{4})",
            r"Credit\s+Card\s+Number[:\s]*(\d{8}\*{4}\d{4})",
        ],
    )
    .field(
        Field::StatementDate,
        &[
            r"Statement\s+Generation\s+Date[:\s]*(\d{2}[/\-]\d{2}[/\-]\d{4})",
            // Statement period range; the last group (period end) is taken.
            r"(\d{2}[/\-]\d{2}[/\-]\d{4})\s*-\s*(\d{2}[/\-]\d{2}[/\-]\d{4})",
        ],
    )
    .field(
        Field::PaymentDueDate,
        &[r"Payment\s+Due\s+Date[:\s]*(\d{2}[/\-]\d{2}[/\-]\d{4})"],
    )
    .field(
        Field::TotalAmountDue,
        &[
            r"Total\s+Payment\s+Due[:\s]*([0-9,]+\.?\d{0,2})\s*Dr",
            r"Total\s+Amount\s+Due[:\s]*([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::MinimumAmountDue,
        &[
            r"Minimum\s+Payment\s+Due[:\s]*([0-9,]+\.?\d{0,2})\s*Dr",
            r"Minimum\s+Amount\s+Due[:\s]*([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(Field::CreditLimit, &[r"Credit\s+Limit[:\s]*([0-9,]+\.?\d{0,2})"])
    .field(
        Field::AvailableCredit,
        &[r"Available\s+Credit\s+Limit[:\s]*([0-9,]+\.?\d{0,2})"],
    )
    .field(
        Field::PreviousBalance,
        &[r"Previous\s+Balance[:\s]*-?\s*([0-9,]+\.?\d{0,2})\s*Dr"],
    )
}

// No previous_balance pattern: the template does not print one.
fn idfc_first() -> IssuerDefinition {
    IssuerDefinition::new(
        "IDFC FIRST Bank",
        &[r"IDFC\s+FIRST\s+Bank", r"idfcfirstbank\.com", r"IDFB0010225"],
    )
    .field(
        Field::CardNumber,
        &[r"Card\s+Number[:\s]*XXXX\s*(\d{4})", r"Account\s+Number[:\s]*(\d+)"],
    )
    .field(
        Field::StatementDate,
        &[r"(\d{2}/\d{2}/\d{4})\s*-\s*(\d{2}/\d{2}/\d{4})"],
    )
    .field(
        Field::PaymentDueDate,
        &[r"Payment\s+Due\s+Date[:\s]*(\d{2}/\d{2}/\d{4})"],
    )
    // The rupee glyph comes out of the PDF font as a literal "r".
    .field(
        Field::TotalAmountDue,
        &[r"Total\s+Amount\s+Due[:\s]*r([0-9,]+\.?\d{0,2})"],
    )
    .field(
        Field::MinimumAmountDue,
        &[r"Minimum\s+Amount\s+Due[:\s]*r([0-9,]+\.?\d{0,2})"],
    )
    .field(Field::CreditLimit, &[r"Credit\s+Limit[:\s]*r([0-9,]+\.?\d{0,2})"])
    .field(
        Field::AvailableCredit,
        &[r"Available\s+Credit\s+Limit[:\s]*r([0-9,]+\.?\d{0,2})"],
    )
}

// RBL prints its summary as an unlabeled column of figures, so most
// patterns key off layout rather than labels.
fn rbl() -> IssuerDefinition {
    IssuerDefinition::new(
        "RBL Bank",
        &[r"RBL\s+Bank", r"rblbank\.com", r"L65191PN1943PLC007308"],
    )
    .field(
        Field::CardNumber,
        &[
            r"(\d{4}\s*XXXX\s*XXXX\s*\d{4})",
            r"(\d{4}\s*X{4}\s*X{4}\s*\d{4})",
        ],
    )
    .field(
        Field::StatementDate,
        &[r"(\d{2}/\d{2}/\d{4})\s*to\s*(\d{2}/\d{2}/\d{4})"],
    )
    .field(Field::PaymentDueDate, &[r"Immediate(\d{2}/\d{2}/\d{4})"])
    .field(
        Field::TotalAmountDue,
        &[r"([0-9,]+\.?\d{0,2})\s*\n\s*([0-9,]+\.?\d{0,2})\s*\n\s*0\.00"],
    )
    .field(Field::MinimumAmountDue, &[r"Minimum[^0-9]*([0-9,]+\.?\d{0,2})"])
    .field(Field::CreditLimit, &[r"([0-9,]+\.?\d{0,2})\s*0\.00\s*0\.00"])
}

fn american_express() -> IssuerDefinition {
    IssuerDefinition::new(
        "American Express",
        &[r"American\s+Express", r"americanexpress\.com", r"AMEX"],
    )
    .field(
        Field::CardNumber,
        &[r"Account\s+Ending\s*(\d-\d{5})", r"Card\s+Ending\s*(\d-\d{5})"],
    )
    .field(
        Field::StatementDate,
        &[r"Closing\s+Date[:\s]*(\d{2}/\d{2}/\d{2,4})"],
    )
    .field(
        Field::PaymentDueDate,
        &[r"Payment\s+Due\s+Date[:\s]*(\d{2}/\d{2}/\d{2,4})"],
    )
    .field(
        Field::TotalAmountDue,
        &[
            r"New\s+Balance[:\s]*\$([0-9,]+\.?\d{0,2})",
            r"Total[:\s]*\$([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::MinimumAmountDue,
        &[r"Minimum\s+Payment\s+Due[:\s]*\$([0-9,]+\.?\d{0,2})"],
    )
    .field(
        Field::CreditLimit,
        &[
            r"Pay\s+Over\s+Time\s+Limit[:\s]*\$([0-9,]+\.?\d{0,2})",
            r"Credit\s+Limit[:\s]*\$([0-9,]+\.?\d{0,2})",
        ],
    )
    .field(
        Field::AvailableCredit,
        &[r"Available\s+Pay\s+Over\s+Time\s+Limit[:\s]*\$([0-9,]+\.?\d{0,2})"],
    )
    .field(
        Field::PreviousBalance,
        &[r"Previous\s+Balance[:\s]*\$([0-9,]+\.?\d{0,2})"],
    )
}
