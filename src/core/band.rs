use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Arm;

/// Stain classification marking centromere-adjacent bands
pub const CENTROMERE_STAIN: &str = "acen";

/// Number of fields in a raw band record (no arm)
pub const RAW_BAND_FIELDS: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BandError {
    #[error("Chromosome {chromosome}: band record has {found} fields, expected {expected}")]
    WrongFieldCount {
        chromosome: String,
        expected: usize,
        found: usize,
    },

    #[error("Chromosome {chromosome}, band '{band}': invalid {field} '{value}'")]
    InvalidCoordinate {
        chromosome: String,
        band: String,
        field: &'static str,
        value: String,
    },

    #[error("Chromosome {chromosome}, band '{band}': {system} stop {stop} is before start {start}")]
    InvertedRange {
        chromosome: String,
        band: String,
        system: &'static str,
        start: u64,
        stop: u64,
    },

    #[error("Chromosome {chromosome}, band '{band}': starts at {start}, before the preceding band at {previous_start}")]
    Unordered {
        chromosome: String,
        band: String,
        start: u64,
        previous_start: u64,
    },

    #[error("Too many bands: exceeds maximum of {limit}")]
    TooManyBands { limit: usize },

    #[error("Chromosome {chromosome}: centromere {start}-{stop} is too short to split into p and q halves")]
    InvalidCentromere {
        chromosome: String,
        start: u64,
        stop: u64,
    },
}

/// One stained segment of a chromosome.
///
/// Bands are treated as values: every transformation returns a new `Band`
/// rather than modifying one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Arm assignment, unassigned until a strategy labels it
    #[serde(default)]
    pub arm: Arm,

    /// Band identifier (e.g. `p36.33`), passed through untouched
    pub name: String,

    /// Base-pair start coordinate
    pub bp_start: u64,

    /// Base-pair stop coordinate
    pub bp_stop: u64,

    /// ISCN start coordinate
    pub iscn_start: u64,

    /// ISCN stop coordinate
    pub iscn_stop: u64,

    /// Stain classification (e.g. `gpos50`, `gneg`, `acen`)
    pub stain: String,
}

impl Band {
    /// Create a band whose ISCN coordinates equal its base-pair coordinates
    pub fn synthetic(arm: Arm, name: &str, start: u64, stop: u64, stain: &str) -> Self {
        Self {
            arm,
            name: name.to_string(),
            bp_start: start,
            bp_stop: stop,
            iscn_start: start,
            iscn_stop: stop,
            stain: stain.to_string(),
        }
    }

    /// Parse a raw band record `[name, bp_start, bp_stop, iscn_start, iscn_stop, stain]`.
    ///
    /// # Errors
    ///
    /// Returns `BandError::WrongFieldCount` if the record does not have six fields,
    /// `BandError::InvalidCoordinate` if a coordinate is not a decimal integer, or
    /// `BandError::InvertedRange` if a stop precedes its start.
    pub fn parse<S: AsRef<str>>(chromosome: &str, fields: &[S]) -> Result<Self, BandError> {
        if fields.len() != RAW_BAND_FIELDS {
            return Err(BandError::WrongFieldCount {
                chromosome: chromosome.to_string(),
                expected: RAW_BAND_FIELDS,
                found: fields.len(),
            });
        }

        let name = fields[0].as_ref().trim().to_string();
        let coordinate = |index: usize, field: &'static str| -> Result<u64, BandError> {
            let value = fields[index].as_ref().trim();
            value.parse().map_err(|_| BandError::InvalidCoordinate {
                chromosome: chromosome.to_string(),
                band: name.clone(),
                field,
                value: value.to_string(),
            })
        };

        let band = Self {
            arm: Arm::Unassigned,
            bp_start: coordinate(1, "bp_start")?,
            bp_stop: coordinate(2, "bp_stop")?,
            iscn_start: coordinate(3, "iscn_start")?,
            iscn_stop: coordinate(4, "iscn_stop")?,
            stain: fields[5].as_ref().trim().to_string(),
            name,
        };
        band.validate(chromosome)?;
        Ok(band)
    }

    /// Check that both coordinate ranges are ordered.
    ///
    /// # Errors
    ///
    /// Returns `BandError::InvertedRange` naming the offending coordinate system.
    pub fn validate(&self, chromosome: &str) -> Result<(), BandError> {
        let inverted = |system, start, stop| BandError::InvertedRange {
            chromosome: chromosome.to_string(),
            band: self.name.clone(),
            system,
            start,
            stop,
        };
        if self.bp_stop < self.bp_start {
            return Err(inverted("base-pair", self.bp_start, self.bp_stop));
        }
        if self.iscn_stop < self.iscn_start {
            return Err(inverted("ISCN", self.iscn_start, self.iscn_stop));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_arm(mut self, arm: Arm) -> Self {
        self.arm = arm;
        self
    }

    /// Move the stop of both coordinate systems
    #[must_use]
    pub fn with_stop(mut self, stop: u64) -> Self {
        self.bp_stop = stop;
        self.iscn_stop = stop;
        self
    }

    /// Move the start of both coordinate systems
    #[must_use]
    pub fn with_start(mut self, start: u64) -> Self {
        self.bp_start = start;
        self.iscn_start = start;
        self
    }

    #[must_use]
    pub fn is_centromeric(&self) -> bool {
        self.stain == CENTROMERE_STAIN
    }

    /// Render the band's seven positional fields, arm first
    #[must_use]
    pub fn to_fields(&self) -> [String; 7] {
        [
            self.arm.to_string(),
            self.name.clone(),
            self.bp_start.to_string(),
            self.bp_stop.to_string(),
            self.iscn_start.to_string(),
            self.iscn_stop.to_string(),
            self.stain.clone(),
        ]
    }

    /// Render as `<chromosome> <arm> <name> <bp_start> <bp_stop> <iscn_start> <iscn_stop> <stain>`
    #[must_use]
    pub fn to_line(&self, chromosome: &str) -> String {
        format!("{chromosome} {}", self.to_fields().join(" "))
    }
}

/// Centromere position for one chromosome, in base pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Centromere {
    pub start: u64,
    pub stop: u64,
}

impl Centromere {
    /// Create a centromere, requiring room for a non-empty `pcen` and `qcen`.
    ///
    /// # Errors
    ///
    /// Returns `BandError::InvalidCentromere` if `stop - start < 2`.
    pub fn new(chromosome: &str, start: u64, stop: u64) -> Result<Self, BandError> {
        if stop < start || stop - start < 2 {
            return Err(BandError::InvalidCentromere {
                chromosome: chromosome.to_string(),
                start,
                stop,
            });
        }
        Ok(Self { start, stop })
    }

    /// First coordinate of `qcen`.
    ///
    /// Half the centromere length is rounded half-to-even.
    #[must_use]
    pub fn midpoint(&self) -> u64 {
        let span = self.stop - self.start;
        let mut half = span / 2;
        if span % 2 == 1 && half % 2 == 1 {
            half += 1;
        }
        self.start + half
    }
}
