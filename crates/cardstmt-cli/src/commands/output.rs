//! Rendering of statement records: text summary, grid table, CSV, and JSON.

use std::path::Path;

use console::{style, StyledObject};

use cardstmt_core::{BatchSummary, Field, ParsingStatus, StatementRecord};

/// Progress symbol for a status.
pub fn status_symbol(status: ParsingStatus) -> StyledObject<&'static str> {
    match status {
        ParsingStatus::Success => style("✓").green(),
        ParsingStatus::Partial => style("⚠").yellow(),
        ParsingStatus::Failed | ParsingStatus::Error => style("✗").red(),
    }
}

/// Per-document progress line.
pub fn progress_line(record: &StatementRecord) -> String {
    format!(
        "  {} {} - {}  ({})",
        status_symbol(record.parsing_status),
        record.issuer,
        record.parsing_status,
        record.file_name
    )
}

/// Canonical JSON for a set of records.
pub fn format_json(records: &[StatementRecord]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Text block for one record.
pub fn format_record_text(record: &StatementRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", record.file_name));
    output.push_str(&format!("Issuer: {}\n", record.issuer));
    output.push_str(&format!(
        "Status: {}\n",
        record.parsing_status.as_str().to_uppercase()
    ));
    output.push_str(&format!("{}\n", "-".repeat(80)));

    if matches!(
        record.parsing_status,
        ParsingStatus::Success | ParsingStatus::Partial
    ) {
        for (field, value) in record.extracted_fields() {
            output.push_str(&format!("  {:20}: {}\n", field.label(), value));
        }
    }

    if !record.errors.is_empty() {
        output.push_str("\n  Warnings/Errors:\n");
        for error in &record.errors {
            output.push_str(&format!("    - {}\n", error));
        }
    }

    output
}

/// Summary of every record in a batch.
pub fn format_summary(records: &[StatementRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.push_str("PARSING SUMMARY\n");
    output.push_str(&format!("{}\n", "=".repeat(80)));

    for record in records {
        output.push('\n');
        output.push_str(&format_record_text(record));
    }

    output
}

const TABLE_COLUMNS: [&str; 8] = [
    "file_name",
    "issuer",
    "card_number",
    "statement_date",
    "payment_due_date",
    "total_amount_due",
    "minimum_amount_due",
    "parsing_status",
];

fn table_row(record: &StatementRecord) -> [String; 8] {
    let field = |f: Field| record.get(f).unwrap_or("").to_string();
    [
        record.file_name.clone(),
        record.issuer.clone(),
        field(Field::CardNumber),
        field(Field::StatementDate),
        field(Field::PaymentDueDate),
        field(Field::TotalAmountDue),
        field(Field::MinimumAmountDue),
        record.parsing_status.to_string(),
    ]
}

/// Grid table of the key columns.
pub fn format_table(records: &[StatementRecord]) -> String {
    if records.is_empty() {
        return "No results to display\n".to_string();
    }

    let rows: Vec<[String; 8]> = records.iter().map(table_row).collect();

    let mut widths: Vec<usize> = TABLE_COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&fill.to_string().repeat(width + 2));
            line.push('+');
        }
        line.push('\n');
        line
    };
    let render = |cells: &[&str]| {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!(" {:<width$} |", cell, width = *width));
        }
        line.push('\n');
        line
    };

    let mut output = border('-');
    output.push_str(&render(&TABLE_COLUMNS[..]));
    output.push_str(&border('='));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output.push_str(&render(&cells));
        output.push_str(&border('-'));
    }

    output
}

const CSV_HEADER: [&str; 12] = [
    "file_name",
    "issuer",
    "card_number",
    "statement_date",
    "payment_due_date",
    "total_amount_due",
    "minimum_amount_due",
    "credit_limit",
    "available_credit",
    "previous_balance",
    "parsing_status",
    "errors",
];

fn write_records<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    records: &[StatementRecord],
) -> anyhow::Result<()> {
    wtr.write_record(CSV_HEADER)?;

    for record in records {
        let mut row = vec![record.file_name.clone(), record.issuer.clone()];
        row.extend(Field::ALL.iter().map(|f| record.get(*f).unwrap_or("").to_string()));
        row.push(record.parsing_status.to_string());
        row.push(record.errors.join("; "));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// CSV with one row per record.
pub fn format_csv(records: &[StatementRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    write_records(&mut wtr, records)?;
    Ok(String::from_utf8(wtr.into_inner()?)?)
}

/// Write the CSV summary file.
pub fn write_csv(path: &Path, records: &[StatementRecord]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_records(&mut wtr, records)
}

/// Final statistics banner.
pub fn format_statistics(records: &[StatementRecord]) -> String {
    let rule = "=".repeat(80);
    format!("{}\n{}\n{}\n", rule, BatchSummary::from_records(records), rule)
}
