use std::path::PathBuf;

use clap::Args;

use crate::arms;
use crate::cli::strategies::load_table;
use crate::cli::OutputFormat;
use crate::core::chromosome::ChromosomeBands;
use crate::core::types::{OrganismId, Strategy};
use crate::parsing::bands::parse_bands_file;
use crate::parsing::centromeres::parse_centromeres_file;

#[derive(Args)]
pub struct ApplyArgs {
    /// Band table (chrom, name, bp_start, bp_stop, iscn_start, iscn_stop, stain), optionally gzipped
    #[arg(required = true)]
    pub bands: PathBuf,

    /// Strategy to apply (overrides --organism)
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Organism whose strategy should be looked up in the strategy table
    #[arg(long)]
    pub organism: Option<String>,

    /// Centromere table (chrom, start, stop), required by the merger strategy
    #[arg(long)]
    pub centromeres: Option<PathBuf>,

    /// Path to a custom strategy table
    #[arg(long)]
    pub strategies: Option<PathBuf>,
}

/// Execute apply subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be parsed or arm assignment fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ApplyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let strategy = resolve_strategy(&args)?;
    let bands = parse_bands_file(&args.bands)?;

    if verbose {
        eprintln!(
            "Parsed {} bands on {} chromosomes; applying {strategy}",
            bands.band_count(),
            bands.len()
        );
    }

    let centromeres = args
        .centromeres
        .as_deref()
        .map(parse_centromeres_file)
        .transpose()?;
    if strategy.needs_centromeres() && centromeres.is_none() {
        anyhow::bail!("The {strategy} strategy requires --centromeres");
    }

    let labelled = arms::apply(strategy, &bands, centromeres.as_ref())?;

    match format {
        OutputFormat::Text => {
            for line in labelled.collapse() {
                println!("{line}");
            }
        }
        OutputFormat::Json => print_json(strategy, &labelled)?,
        OutputFormat::Tsv => print_tsv(&labelled),
    }

    Ok(())
}

fn resolve_strategy(args: &ApplyArgs) -> anyhow::Result<Strategy> {
    if let Some(strategy) = args.strategy {
        return Ok(strategy);
    }
    let table = load_table(args.strategies.as_ref())?;
    Ok(match &args.organism {
        Some(organism) => table.strategy_for(&OrganismId::new(organism.as_str())),
        None => table.default,
    })
}

fn print_json(strategy: Strategy, bands: &ChromosomeBands) -> anyhow::Result<()> {
    let chromosomes: Vec<serde_json::Value> = bands
        .chromosome_names()
        .into_iter()
        .map(|name| {
            serde_json::json!({
                "chromosome": name,
                "bands": bands.get(name).unwrap_or_default(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "strategy": strategy,
        "chromosome_count": bands.len(),
        "band_count": bands.band_count(),
        "chromosomes": chromosomes,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(bands: &ChromosomeBands) {
    println!("chrom\tarm\tname\tbp_start\tbp_stop\tiscn_start\tiscn_stop\tstain");
    for name in bands.chromosome_names() {
        for band in bands.get(name).unwrap_or_default() {
            println!("{name}\t{}", band.to_fields().join("\t"));
        }
    }
}
