use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::policy::table::StrategyTable;

#[derive(Args)]
pub struct StrategiesArgs {
    /// Path to a custom strategy table (defaults to the embedded table)
    #[arg(long)]
    pub strategies: Option<PathBuf>,
}

/// Load the custom strategy table if given, else the embedded one
///
/// # Errors
///
/// Returns an error if the table cannot be read or parsed.
pub fn load_table(path: Option<&PathBuf>) -> anyhow::Result<StrategyTable> {
    Ok(match path {
        Some(path) => StrategyTable::load_from_file(path)?,
        None => StrategyTable::load_embedded()?,
    })
}

/// Execute strategies subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or serialized.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: StrategiesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = load_table(args.strategies.as_ref())?;

    if verbose {
        eprintln!(
            "Loaded strategy table version {} with {} overrides",
            table.version,
            table.organisms.len()
        );
    }

    match format {
        OutputFormat::Text => {
            println!("Default strategy: {}", table.default);
            println!("{}", "-".repeat(40));
            for (organism, strategy) in &table.organisms {
                println!("{organism:<30} {strategy}");
            }
        }
        OutputFormat::Json => println!("{}", table.to_json()?),
        OutputFormat::Tsv => {
            println!("organism\tstrategy");
            for (organism, strategy) in &table.organisms {
                println!("{organism}\t{strategy}");
            }
            println!("*\t{}", table.default);
        }
    }

    Ok(())
}
