//! Organism-to-strategy policy table.
//!
//! Which arm-assignment strategy runs for an organism is configuration, not
//! code. The embedded table is compiled into the binary (and validated by
//! `build.rs`); a custom table can be loaded from a JSON file instead.
//!
//! ## Embedded Table
//!
//! | Organism | Strategy |
//! |----------|----------|
//! | `zea-mays` | merger (centromeres from a separate dataset) |
//! | `drosophila-melanogaster` | patcher |
//! | everything else | parser |
//!
//! ## Example
//!
//! ```rust
//! use cytobands::policy::table::StrategyTable;
//! use cytobands::core::types::{OrganismId, Strategy};
//!
//! let table = StrategyTable::load_embedded().unwrap();
//! assert_eq!(table.strategy_for(&OrganismId::new("zea-mays")), Strategy::Merger);
//! assert_eq!(table.strategy_for(&OrganismId::new("oryza-sativa")), Strategy::Parser);
//! ```

pub mod table;
