//! Chromosome arm assignment and centromere reconciliation.
//!
//! Three independent strategies label every band with its arm:
//!
//! - [`merger`]: splits arms at an externally supplied centromere coordinate,
//!   drops q-arm bands overlapping it, and synthesizes `pcen`/`qcen` bands
//! - [`parser`]: splits arms at the last embedded `acen` band of each chromosome
//! - [`patcher`]: synthesizes a missing `pter` telomere band and labels every band `q`
//!
//! Exactly one strategy runs per organism. Each is a pure function of its
//! inputs and returns a fresh [`ChromosomeBands`].
//!
//! ## Example
//!
//! ```rust
//! use cytobands::arms;
//! use cytobands::core::band::Band;
//! use cytobands::core::chromosome::ChromosomeBands;
//! use cytobands::core::types::Strategy;
//!
//! let mut bands = ChromosomeBands::new();
//! bands.push("1", Band::parse("1", &["p11", "1", "100", "1", "100", "gneg"]).unwrap());
//! bands.push("1", Band::parse("1", &["q11", "101", "200", "101", "200", "acen"]).unwrap());
//!
//! let labelled = arms::apply(Strategy::Parser, &bands, None).unwrap();
//! assert_eq!(labelled.collapse()[0], "1 p p11 1 100 1 100 gneg");
//! ```

use thiserror::Error;

use crate::core::chromosome::{CentromereMap, ChromosomeBands};
use crate::core::types::{Arm, Strategy};

pub mod merger;
pub mod parser;
pub mod patcher;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArmError {
    #[error("No centromere coordinates for chromosome {chromosome}")]
    MissingCentromere { chromosome: String },

    #[error("The merger strategy requires a centromere map")]
    NoCentromereMap,
}

/// Apply one strategy to an organism's bands.
///
/// # Errors
///
/// Returns `ArmError::NoCentromereMap` if the merger is selected without
/// centromeres, or `ArmError::MissingCentromere` if a chromosome has none.
pub fn apply(
    strategy: Strategy,
    bands: &ChromosomeBands,
    centromeres: Option<&CentromereMap>,
) -> Result<ChromosomeBands, ArmError> {
    match strategy {
        Strategy::Merger => {
            let centromeres = centromeres.ok_or(ArmError::NoCentromereMap)?;
            merger::merge_centromeres(bands, centromeres)
        }
        Strategy::Parser => Ok(parser::parse_centromeres(bands)),
        Strategy::Patcher => Ok(patcher::patch_telomeres(bands)),
        Strategy::Passthrough => Ok(passthrough(bands)),
    }
}

/// Copy the bands with every arm left unassigned
#[must_use]
pub fn passthrough(bands: &ChromosomeBands) -> ChromosomeBands {
    label_all(bands, Arm::Unassigned)
}

pub(crate) fn label_all(bands: &ChromosomeBands, arm: Arm) -> ChromosomeBands {
    bands
        .iter()
        .map(|(name, chromosome)| {
            let labelled = chromosome
                .iter()
                .map(|band| band.clone().with_arm(arm))
                .collect();
            (name.to_string(), labelled)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::band::Band;

    fn sample() -> ChromosomeBands {
        let mut bands = ChromosomeBands::new();
        bands.push("1", Band::synthetic(Arm::P, "p1", 1, 10, "gneg"));
        bands.push("1", Band::synthetic(Arm::Q, "q1", 11, 20, "gpos"));
        bands
    }

    #[test]
    fn test_passthrough_clears_arms() {
        let out = apply(Strategy::Passthrough, &sample(), None).unwrap();
        assert!(out
            .iter()
            .flat_map(|(_, bands)| bands)
            .all(|band| band.arm == Arm::Unassigned));
        assert_eq!(out.band_count(), 2);
    }

    #[test]
    fn test_merger_requires_centromere_map() {
        let err = apply(Strategy::Merger, &sample(), None).unwrap_err();
        assert_eq!(err, ArmError::NoCentromereMap);
    }
}
