//! # cytobands
//!
//! A library for reconciling cytogenetic band data and assigning chromosome arms.
//!
//! Chromosome ideograms are drawn from cytobands: stained segments of each
//! chromosome with base-pair and ISCN coordinates. Databases publish these bands
//! in different conventions. Some embed the centromere as `acen` bands, some
//! omit it and publish centromere positions separately, and some skip the
//! terminal band touching position 1.
//!
//! `cytobands` normalizes each organism's bands into one list in which every
//! band carries its arm (`p` or `q`) and the centromere is explicit.
//!
//! ## Features
//!
//! - **Centromere merging**: Splits arms at external centromere coordinates and adds `pcen`/`qcen` bands
//! - **Centromere parsing**: Splits arms at the `acen` bands already in the data
//! - **Telomere patching**: Adds a missing `pter` band so coverage starts at 1
//! - **Strategy table**: Chooses the strategy per organism from configuration
//! - **Concurrent loading**: Reads every source dataset at once on a small worker pool
//! - **Failure isolation**: One organism's bad data never stops the others
//!
//! ## Example
//!
//! ```rust
//! use cytobands::arms;
//! use cytobands::core::band::Centromere;
//! use cytobands::core::chromosome::CentromereMap;
//! use cytobands::parsing::bands::parse_bands_text;
//! use cytobands::Strategy;
//!
//! let bands = parse_bands_text("1\tb1\t1\t100\t1\t100\tgneg\n1\tb2\t150\t300\t150\t300\tgneg\n").unwrap();
//! let mut centromeres = CentromereMap::new();
//! centromeres.insert("1", Centromere::new("1", 110, 140).unwrap());
//!
//! let merged = arms::apply(Strategy::Merger, &bands, Some(&centromeres)).unwrap();
//! for line in merged.collapse() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Band, centromere and chromosome band list types
//! - [`arms`]: The merger, parser and patcher strategies
//! - [`policy`]: Organism-to-strategy table
//! - [`parsing`]: Readers for band, centromere and source datasets
//! - [`pipeline`]: Concurrent fetch, per-organism reconciliation, and output writing
//! - [`cli`]: Command-line interface implementation

pub mod arms;
pub mod cli;
pub mod core;
pub mod parsing;
pub mod pipeline;
pub mod policy;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::band::{Band, Centromere};
pub use crate::core::chromosome::{CentromereMap, ChromosomeBands};
pub use crate::core::types::*;
pub use policy::table::StrategyTable;
