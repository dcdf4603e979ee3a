use std::path::PathBuf;

use clap::Args;
use tracing::warn;

use crate::cli::strategies::load_table;
use crate::cli::OutputFormat;
use crate::core::types::OrganismId;
use crate::pipeline::fetch::{fetch_all, FetchJob};
use crate::pipeline::reconcile::{reconcile_all, Reconciliation};
use crate::pipeline::writer::write_all;

#[derive(Args)]
pub struct ReconcileArgs {
    /// Source dataset (JSON, optionally gzipped); earlier sources win for shared organisms
    #[arg(short, long = "source", required = true, num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// Centromere table for an organism, as ORGANISM=PATH (repeatable)
    #[arg(long, value_parser = parse_centromere_arg)]
    pub centromeres: Vec<(OrganismId, PathBuf)>,

    /// Directory to write band files and the manifest to
    #[arg(short, long, default_value = "bands")]
    pub output_dir: PathBuf,

    /// Path to a custom strategy table
    #[arg(long)]
    pub strategies: Option<PathBuf>,
}

fn parse_centromere_arg(value: &str) -> Result<(OrganismId, PathBuf), String> {
    let (organism, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected ORGANISM=PATH, got '{value}'"))?;
    if organism.is_empty() || path.is_empty() {
        return Err(format!("expected ORGANISM=PATH, got '{value}'"));
    }
    Ok((OrganismId::new(organism), PathBuf::from(path)))
}

/// Execute reconcile subcommand
///
/// # Errors
///
/// Returns an error if the strategy table cannot be loaded, the fetch pool
/// fails, output cannot be written, or no organism could be reconciled.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ReconcileArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table(args.strategies.as_ref())?;

    for (organism, _) in &args.centromeres {
        if !table.strategy_for(organism).needs_centromeres() {
            warn!("Centromeres supplied for {organism}, but its strategy does not use them");
        }
    }

    let jobs: Vec<FetchJob> = args
        .sources
        .iter()
        .cloned()
        .map(FetchJob::Source)
        .chain(
            args.centromeres
                .iter()
                .cloned()
                .map(|(organism, path)| FetchJob::Centromeres { organism, path }),
        )
        .collect();

    let outcome = fetch_all(jobs)?;
    outcome.log_summary();

    if verbose {
        eprintln!(
            "Loaded {} sources and {} centromere tables ({} failed)",
            outcome.sources.len(),
            outcome.centromeres.len(),
            outcome.failures.len()
        );
    }

    let reconciliation = reconcile_all(&outcome.sources, &outcome.centromeres, &table);
    let manifest = write_all(&args.output_dir, &reconciliation.organisms)?;

    match format {
        OutputFormat::Text => print_text_summary(&args, &reconciliation),
        OutputFormat::Json => print_json_summary(&args, &reconciliation, &manifest.created_at)?,
        OutputFormat::Tsv => print_tsv_summary(&reconciliation),
    }

    if reconciliation.organisms.is_empty() && !reconciliation.failures.is_empty() {
        anyhow::bail!(
            "No organism could be reconciled ({} failed)",
            reconciliation.failures.len()
        );
    }

    Ok(())
}

fn print_text_summary(args: &ReconcileArgs, reconciliation: &Reconciliation) {
    println!("Reconciliation Results");
    println!("{}", "=".repeat(60));
    println!("\nOutput directory: {}", args.output_dir.display());

    println!("\nWritten ({}):", reconciliation.organisms.len());
    for organism in &reconciliation.organisms {
        println!(
            "  {:<30} {:>7} bands  {:<11} {} ({})",
            organism.organism,
            organism.lines.len(),
            organism.strategy,
            organism.db,
            organism.source
        );
    }

    if !reconciliation.failures.is_empty() {
        println!("\nSkipped ({}):", reconciliation.failures.len());
        for failure in &reconciliation.failures {
            println!("  {}", failure.error);
        }
    }
}

fn print_json_summary(
    args: &ReconcileArgs,
    reconciliation: &Reconciliation,
    created_at: &str,
) -> anyhow::Result<()> {
    let written: Vec<serde_json::Value> = reconciliation
        .organisms
        .iter()
        .map(|organism| {
            serde_json::json!({
                "organism": organism.organism,
                "source": organism.source,
                "genbank_accession": organism.genbank_accession,
                "db": organism.db,
                "strategy": organism.strategy,
                "band_count": organism.lines.len(),
            })
        })
        .collect();
    let skipped: Vec<serde_json::Value> = reconciliation
        .failures
        .iter()
        .map(|failure| {
            serde_json::json!({
                "organism": failure.organism,
                "error": failure.error.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "output_dir": args.output_dir.display().to_string(),
        "created_at": created_at,
        "written": written,
        "skipped": skipped,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(reconciliation: &Reconciliation) {
    println!("organism\tstatus\tstrategy\tsource\tdb\tband_count");
    for organism in &reconciliation.organisms {
        println!(
            "{}\twritten\t{}\t{}\t{}\t{}",
            organism.organism,
            organism.strategy,
            organism.source,
            organism.db,
            organism.lines.len()
        );
    }
    for failure in &reconciliation.failures {
        println!("{}\tskipped\t\t\t\t", failure.organism);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_centromere_arg() {
        let (organism, path) = parse_centromere_arg("zea-mays=data/maize.tsv").unwrap();
        assert_eq!(organism, OrganismId::new("zea-mays"));
        assert_eq!(path, PathBuf::from("data/maize.tsv"));

        assert!(parse_centromere_arg("zea-mays").is_err());
        assert!(parse_centromere_arg("=maize.tsv").is_err());
    }
}
