//! Process command - extract fields from a single statement file.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cardstmt_core::{BatchRunner, FileTextExtractor, StatementRecord};

use super::{load_config, output};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or pre-extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Extracting statement fields...");

    let registry = Arc::new(config.build_registry()?);
    let runner = BatchRunner::new(registry, FileTextExtractor::from_config(&config.pdf));
    let input = args.input.clone();
    let record = tokio::task::spawn_blocking(move || runner.process(&input)).await?;

    pb.finish_and_clear();

    let rendered = format_record(&record, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &rendered)?;
        println!(
            "{} Output written to {}",
            output::status_symbol(record.parsing_status),
            output_path.display()
        );
    } else {
        println!("{}", rendered);
    }

    if !record.errors.is_empty() {
        eprintln!(
            "{} {} - {}",
            style("ℹ").blue(),
            record.issuer,
            record.parsing_status
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(record: &StatementRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => output::format_csv(std::slice::from_ref(record)),
        OutputFormat::Text => Ok(output::format_record_text(record)),
    }
}
