//! leadsweep CLI
//!
//! One-shot batch deduplication of lead documents: keep the most recently
//! dated record per id/email identity and log every overwritten field.

use anyhow::{Context, Result};
use clap::Parser;
use leadsweep_core::deduplicate;
use leadsweep_formats::{read_document, write_document, DEFAULT_COLLECTION_FIELD};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Root field name for the change-log document
const CHANGES_FIELD: &str = "changes";

#[derive(Parser)]
#[command(name = "leadsweep")]
#[command(version, about = "Deduplicate lead records by id/email identity, keeping the latest entry", long_about = None)]
struct Cli {
    /// Input JSON document containing the lead collection
    input: PathBuf,

    /// Output file for the deduplicated records
    output: PathBuf,

    /// Output file for the supersession change log
    changelog: PathBuf,

    /// Top-level collection field name in the input document
    #[arg(long, default_value = DEFAULT_COLLECTION_FIELD)]
    collection: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let unique = run(&cli)?;
    println!("Wrote {} unique leads to {}", unique, cli.output.display());

    Ok(())
}

/// Load, deduplicate, and persist. Returns the number of unique records written.
///
/// Deduplication completes in memory before either sink is created. The
/// records file is written before the change log, so a failure writing the
/// change log can leave the records file behind.
fn run(cli: &Cli) -> Result<usize> {
    info!("Deduplicating {:?}", cli.input);

    let records = read_document(&cli.input, &cli.collection)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    let outcome = deduplicate(records)?;

    info!(
        "{} records in, {} unique, {} superseded, {} discarded ({:.1}% dropped)",
        outcome.stats.total_seen,
        outcome.stats.unique_count,
        outcome.stats.superseded,
        outcome.stats.discarded,
        outcome.stats.dedup_rate()
    );

    write_document(&cli.output, &cli.collection, &outcome.unique_records)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    write_document(&cli.changelog, CHANGES_FIELD, &outcome.change_log)
        .with_context(|| format!("failed to write {}", cli.changelog.display()))?;

    Ok(outcome.stats.unique_count)
}
