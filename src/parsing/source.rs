use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::band::{Band, BandError};
use crate::core::chromosome::{check_band_order, ChromosomeBands};
use crate::core::types::OrganismId;
use crate::parsing::{read_text, ParseError};
use crate::utils::validation::check_band_limit;

/// Everything one data source provides: band data for each organism it knows.
///
/// ```json
/// {
///   "name": "ucsc",
///   "organisms": {
///     "homo-sapiens": [
///       {
///         "genbank_accession": "GCA_000001405.15",
///         "db": "hg38",
///         "bands": { "1": [["p36.33", "1", "2300000", "1", "100", "gneg"]] }
///       }
///     ]
///   },
///   "unmapped_dbs": ["hg16"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceData {
    /// Source name (e.g. `ucsc`, `ensembl`); defaults to the file stem
    #[serde(default)]
    pub name: String,

    /// Assemblies with band data, per organism
    #[serde(default)]
    pub organisms: BTreeMap<OrganismId, Vec<AssemblyBands>>,

    /// Source databases that could not be mapped to a GenBank assembly
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unmapped_dbs: Vec<String>,
}

/// Band data for one assembly of one organism.
///
/// Bands stay as raw records until the organism is reconciled, so that a
/// malformed band only fails its own organism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyBands {
    pub genbank_accession: String,
    pub db: String,

    /// Raw `[name, bp_start, bp_stop, iscn_start, iscn_stop, stain]` records per chromosome
    pub bands: BTreeMap<String, Vec<Vec<String>>>,
}

impl AssemblyBands {
    /// Ordering key used to choose among several assemblies of one organism
    #[must_use]
    pub fn rank_key(&self) -> (&str, &str) {
        (self.genbank_accession.as_str(), self.db.as_str())
    }

    /// Validate and convert the raw records.
    ///
    /// Records must be in ascending start order within each chromosome.
    ///
    /// # Errors
    ///
    /// Returns the first `BandError` encountered: a malformed record, a band
    /// starting before its predecessor, or more bands than the limit allows.
    pub fn parse_bands(&self) -> Result<ChromosomeBands, BandError> {
        let mut parsed = ChromosomeBands::new();
        let mut count = 0usize;

        for (chromosome, records) in &self.bands {
            let mut bands: Vec<Band> = Vec::with_capacity(records.len());
            for record in records {
                check_band_limit(count)?;
                let band = Band::parse(chromosome, record.as_slice())?;
                check_band_order(chromosome, bands.last(), &band)?;
                bands.push(band);
                count += 1;
            }
            parsed.insert(chromosome.clone(), bands);
        }

        Ok(parsed)
    }
}

/// Parse a source dataset file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Json`
/// if it is not a valid source document.
pub fn parse_source_file(path: &Path) -> Result<SourceData, ParseError> {
    let content = read_text(path)?;
    let mut source = parse_source_json(&content)?;
    if source.name.is_empty() {
        source.name = source_name_from_path(path);
    }
    Ok(source)
}

/// Parse a source dataset from JSON text
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not a valid source document.
pub fn parse_source_json(json: &str) -> Result<SourceData, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// File name with `.gz` and `.json` suffixes removed
fn source_name_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("source");
    let trimmed = file_name.strip_suffix(".gz").unwrap_or(file_name);
    trimmed.strip_suffix(".json").unwrap_or(trimmed).to_string()
}
