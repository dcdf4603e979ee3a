//! Command-line interface for cytobands.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **reconcile**: Load band sources, assign arms per organism, and write band files
//! - **apply**: Run one arm-assignment strategy over a single band table
//! - **strategies**: Show the organism-to-strategy table
//!
//! ## Usage
//!
//! ```text
//! # Reconcile every organism from two sources, with maize centromeres
//! cytobands reconcile -s ensembl.json -s ucsc.json.gz \
//!     --centromeres zea-mays=maize_centromeres.tsv -o data/bands/native
//!
//! # Label one organism's bands by its embedded acen bands
//! cytobands apply rice_bands.tsv --strategy parser
//!
//! # JSON output for scripting
//! cytobands strategies --format json
//! ```

use clap::{Parser, Subcommand};

pub mod apply;
pub mod reconcile;
pub mod strategies;

#[derive(Parser)]
#[command(name = "cytobands")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Reconcile cytogenetic bands and assign chromosome arms")]
#[command(
    long_about = "cytobands merges cytogenetic band data gathered from several databases into one band list per organism.\n\nEvery band is labelled with its chromosome arm (p or q) using the organism's strategy:\n- merger: split at separately supplied centromere coordinates and add pcen/qcen bands\n- parser: split at the embedded acen band\n- patcher: add a missing pter telomere band and report a single q arm"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile band sources into one band file per organism
    Reconcile(reconcile::ReconcileArgs),

    /// Assign arms to a single band table
    Apply(apply::ApplyArgs),

    /// Show the organism-to-strategy table
    Strategies(strategies::StrategiesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
