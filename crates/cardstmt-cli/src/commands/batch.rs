//! Batch processing command for multiple statement files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::{glob, Pattern};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use cardstmt_core::{BatchRunner, FileTextExtractor, ProgressObserver, StatementRecord};

use super::{load_config, output};

/// Extensions picked up when scanning a directory.
const DIRECTORY_PATTERNS: [&str; 3] = ["*.pdf", "*.PDF", "*.txt"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob patterns
    inputs: Vec<String>,

    /// Directory containing statement files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Write all records as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write a CSV summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum, default_value = "both")]
    format: ConsoleFormat,

    /// Number of parallel workers (default: from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ConsoleFormat {
    /// Per-statement text summary
    Summary,
    /// Grid table of key fields
    Table,
    /// Summary followed by table
    Both,
}

/// Prints one line per finished statement above the progress bar.
struct ConsoleProgress {
    pb: ProgressBar,
}

impl ProgressObserver for ConsoleProgress {
    fn on_document(&self, record: &StatementRecord) {
        // println on a hidden bar is a no-op
        if self.pb.is_hidden() {
            println!("{}", output::progress_line(record));
        } else {
            self.pb.println(output::progress_line(record));
        }
        self.pb.inc(1);
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = collect_files(&args)?;
    if files.is_empty() {
        anyhow::bail!("No statement files found. Pass files or use --dir.");
    }

    let jobs = args.jobs.unwrap_or(config.batch.jobs);

    println!(
        "{} Parsing {} statement(s)",
        style("ℹ").blue(),
        files.len()
    );

    let registry = Arc::new(config.build_registry()?);
    let runner = BatchRunner::new(registry, FileTextExtractor::from_config(&config.pdf))
        .with_jobs(jobs);

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let observer = ConsoleProgress { pb: pb.clone() };
    let records = tokio::task::spawn_blocking(move || runner.run(&files, &observer)).await?;

    pb.finish_and_clear();

    println!();
    if matches!(args.format, ConsoleFormat::Summary | ConsoleFormat::Both) {
        print!("{}", output::format_summary(&records));
    }
    if matches!(args.format, ConsoleFormat::Table | ConsoleFormat::Both) {
        println!();
        print!("{}", output::format_table(&records));
    }

    write_outputs(&args, &records)?;

    println!();
    print!("{}", output::format_statistics(&records));

    info!("Batch complete in {:?}", start.elapsed());

    Ok(())
}

fn write_outputs(args: &BatchArgs, records: &[StatementRecord]) -> anyhow::Result<()> {
    if let Some(json_path) = &args.json {
        create_parent(json_path)?;
        fs::write(json_path, output::format_json(records)?)?;
        println!(
            "{} Results saved to {}",
            style("✓").green(),
            json_path.display()
        );
    }

    if let Some(summary_path) = &args.summary {
        create_parent(summary_path)?;
        output::write_csv(summary_path, records)?;
        println!(
            "{} Summary saved to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    Ok(())
}

fn create_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Gather input files from the directory scan and explicit arguments,
/// keeping first-seen order and dropping duplicates.
fn collect_files(args: &BatchArgs) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if let Some(dir) = &args.dir {
        if !dir.is_dir() {
            anyhow::bail!("Directory not found: {}", dir.display());
        }

        let escaped = Pattern::escape(&dir.to_string_lossy());
        for pattern in DIRECTORY_PATTERNS {
            let mut matches: Vec<PathBuf> = glob(&format!("{}/{}", escaped, pattern))?
                .filter_map(|r| r.ok())
                .collect();
            matches.sort();
            files.extend(matches);
        }
    }

    for input in &args.inputs {
        let path = PathBuf::from(input);
        if path.exists() {
            files.push(path);
            continue;
        }

        let matches: Vec<PathBuf> = match glob(input) {
            Ok(paths) => paths.filter_map(|r| r.ok()).collect(),
            Err(e) => {
                debug!("Not a glob pattern {}: {}", input, e);
                Vec::new()
            }
        };

        if matches.is_empty() {
            warn!("Input not found: {}", input);
            eprintln!("{} File not found: {}", style("Warning:").yellow(), input);
        } else {
            files.extend(matches);
        }
    }

    let mut seen = HashSet::new();
    files.retain(|path| seen.insert(path.clone()));

    Ok(files)
}
