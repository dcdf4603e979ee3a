//! Core data types for cytogenetic band reconciliation.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Band`]: One stained segment of a chromosome with base-pair and ISCN coordinates
//! - [`Centromere`]: A centromere coordinate pair for one chromosome
//! - [`ChromosomeBands`]: Ordered bands keyed by chromosome identifier
//! - [`Arm`], [`Strategy`], [`OrganismId`]: Arm labels and organism metadata
//!
//! ## Output Layout
//!
//! Every band is rendered with a fixed positional layout:
//!
//! | Position | Field | Example |
//! |----------|-------|---------|
//! | 1 | chromosome | `1` |
//! | 2 | arm | `p`, `q`, or empty |
//! | 3 | name | `p36.33` |
//! | 4-5 | base-pair start/stop | `1 2300000` |
//! | 6-7 | ISCN start/stop | `1 100` |
//! | 8 | stain | `gneg` |
//!
//! An unassigned arm is rendered as an empty field so that column positions never shift.
//!
//! [`Band`]: band::Band
//! [`Centromere`]: band::Centromere
//! [`ChromosomeBands`]: chromosome::ChromosomeBands
//! [`Arm`]: types::Arm
//! [`Strategy`]: types::Strategy
//! [`OrganismId`]: types::OrganismId

pub mod band;
pub mod chromosome;
pub mod types;
