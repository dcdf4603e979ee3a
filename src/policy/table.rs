use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::core::types::{OrganismId, Strategy};

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Failed to read strategy table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse strategy table: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Strategy table version for compatibility checking
pub const TABLE_VERSION: &str = "1.0.0";

/// Mapping from organism identifier to arm-assignment strategy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTable {
    pub version: String,

    /// Strategy for organisms without an explicit entry
    pub default: Strategy,

    /// Per-organism overrides
    #[serde(default)]
    pub organisms: BTreeMap<OrganismId, Strategy>,
}

impl StrategyTable {
    /// Create a table with no overrides
    #[must_use]
    pub fn new(default: Strategy) -> Self {
        Self {
            version: TABLE_VERSION.to_string(),
            default,
            organisms: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, organism: impl Into<String>, strategy: Strategy) -> Self {
        self.organisms.insert(OrganismId::new(organism), strategy);
        self
    }

    /// Load the embedded default table
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::ParseError` if the embedded JSON is invalid.
    pub fn load_embedded() -> Result<Self, PolicyError> {
        // Validated at compile time by build.rs
        const EMBEDDED_TABLE: &str = include_str!("../../config/organism_strategies.json");
        Self::from_json(EMBEDDED_TABLE)
    }

    /// Load a table from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::ReadError` if the file cannot be read or
    /// `PolicyError::ParseError` if it is not a valid table.
    pub fn load_from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a table from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::ParseError` if the JSON is invalid or names an
    /// unknown strategy.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let table: Self = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if table.version != TABLE_VERSION {
            warn!(
                "Strategy table version mismatch (expected {}, found {})",
                TABLE_VERSION, table.version
            );
        }

        Ok(table)
    }

    /// Serialize the table to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Strategy for an organism, falling back to the default
    #[must_use]
    pub fn strategy_for(&self, organism: &OrganismId) -> Strategy {
        self.organisms
            .get(organism)
            .copied()
            .unwrap_or(self.default)
    }

    /// Organisms that need a centromere dataset
    pub fn merger_organisms(&self) -> impl Iterator<Item = &OrganismId> {
        self.organisms
            .iter()
            .filter(|(_, strategy)| strategy.needs_centromeres())
            .map(|(organism, _)| organism)
    }
}
