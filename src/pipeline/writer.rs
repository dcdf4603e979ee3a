use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::types::OrganismId;
use crate::pipeline::reconcile::ReconciledOrganism;
use crate::utils::validation::{validate_organism_id, ValidationError};

/// File name of the manifest written next to the band files
pub const MANIFEST_FILE: &str = "manifest.json";

/// Prefix of every band file; the files are loaded directly by the ideogram viewer
pub const BAND_FILE_PREFIX: &str = "window.chrBands = ";

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Which assembly each written organism came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: String,

    /// Organism → `[genbank_accession, db]`
    pub organisms: BTreeMap<OrganismId, (String, String)>,
}

impl Manifest {
    #[must_use]
    pub fn new() -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            organisms: BTreeMap::new(),
        }
    }

    pub fn record(&mut self, organism: &ReconciledOrganism) {
        self.organisms.insert(
            organism.organism.clone(),
            (organism.genbank_accession.clone(), organism.db.clone()),
        );
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the band file contents for an organism
///
/// # Errors
///
/// Returns `WriteError::Json` if the lines cannot be serialized.
pub fn render_band_file(lines: &[String]) -> Result<String, WriteError> {
    Ok(format!("{BAND_FILE_PREFIX}{}", serde_json::to_string(lines)?))
}

/// Path of an organism's band file inside `output_dir`
///
/// # Errors
///
/// Returns `WriteError::Validation` if the organism identifier is not a safe file stem.
pub fn band_file_path(output_dir: &Path, organism: &OrganismId) -> Result<PathBuf, WriteError> {
    validate_organism_id(organism.as_str())?;
    Ok(output_dir.join(format!("{organism}.js")))
}

/// Write every organism's band file plus the manifest, creating `output_dir` if needed.
///
/// # Errors
///
/// Returns a `WriteError` if the directory or any file cannot be written.
pub fn write_all(
    output_dir: &Path,
    organisms: &[ReconciledOrganism],
) -> Result<Manifest, WriteError> {
    std::fs::create_dir_all(output_dir).map_err(|source| WriteError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut manifest = Manifest::new();
    for organism in organisms {
        let path = band_file_path(output_dir, &organism.organism)?;
        write_file(&path, &render_band_file(&organism.lines)?)?;
        debug!("Wrote {} bands to {}", organism.lines.len(), path.display());
        manifest.record(organism);
    }

    let manifest_path = output_dir.join(MANIFEST_FILE);
    write_file(&manifest_path, &serde_json::to_string_pretty(&manifest)?)?;

    Ok(manifest)
}

fn write_file(path: &Path, contents: &str) -> Result<(), WriteError> {
    std::fs::write(path, contents).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Strategy;

    fn reconciled(organism: &str) -> ReconciledOrganism {
        ReconciledOrganism {
            organism: OrganismId::new(organism),
            source: "ucsc".to_string(),
            genbank_accession: "GCA_000001405.15".to_string(),
            db: "hg38".to_string(),
            strategy: Strategy::Parser,
            lines: vec![
                "1 p p36.33 1 2300000 1 100 gneg".to_string(),
                "1 q q11 2300001 5000000 100 200 acen".to_string(),
            ],
        }
    }

    #[test]
    fn test_render_band_file() {
        let rendered = render_band_file(&["1 p a 1 2 1 2 gneg".to_string()]).unwrap();
        assert_eq!(rendered, r#"window.chrBands = ["1 p a 1 2 1 2 gneg"]"#);
    }

    #[test]
    fn test_write_all() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("bands");

        let manifest = write_all(&output, &[reconciled("homo-sapiens")]).unwrap();

        let band_file = std::fs::read_to_string(output.join("homo-sapiens.js")).unwrap();
        assert!(band_file.starts_with(BAND_FILE_PREFIX));
        let lines: Vec<String> =
            serde_json::from_str(band_file.trim_start_matches(BAND_FILE_PREFIX)).unwrap();
        assert_eq!(lines.len(), 2);

        let written: Manifest =
            serde_json::from_str(&std::fs::read_to_string(output.join(MANIFEST_FILE)).unwrap())
                .unwrap();
        assert_eq!(written, manifest);
        assert_eq!(
            written.organisms[&OrganismId::new("homo-sapiens")],
            ("GCA_000001405.15".to_string(), "hg38".to_string())
        );
    }

    #[test]
    fn test_band_file_path_rejects_traversal() {
        let dir = Path::new("/tmp/out");
        assert!(band_file_path(dir, &OrganismId::new("../../etc/x")).is_err());
        assert_eq!(
            band_file_path(dir, &OrganismId::new("zea-mays")).unwrap(),
            dir.join("zea-mays.js")
        );
    }
}
