use serde::{Deserialize, Serialize};

/// Unique identifier for an organism, e.g. `homo-sapiens`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrganismId(pub String);

impl OrganismId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrganismId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Chromosome arm a band lies on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arm {
    /// Short arm
    P,
    /// Long arm
    Q,
    /// No arm could be determined
    #[default]
    Unassigned,
}

impl Arm {
    /// Field text used in output lines; unassigned arms render empty
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::P => "p",
            Self::Q => "q",
            Self::Unassigned => "",
        }
    }
}

impl std::fmt::Display for Arm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arm-assignment strategy applied to one organism's bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Split arms at an externally supplied centromere and synthesize `pcen`/`qcen`
    Merger,
    /// Split arms at the embedded `acen` band
    Parser,
    /// Synthesize a missing `pter` band and label every band `q`
    Patcher,
    /// Leave every band unassigned
    Passthrough,
}

impl Strategy {
    /// Whether this strategy needs a centromere map for the organism
    #[must_use]
    pub fn needs_centromeres(self) -> bool {
        matches!(self, Self::Merger)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Self::Merger => "merger",
            Self::Parser => "parser",
            Self::Patcher => "patcher",
            Self::Passthrough => "passthrough",
        })
    }
}
