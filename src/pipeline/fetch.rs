use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::core::chromosome::CentromereMap;
use crate::core::types::OrganismId;
use crate::parsing::centromeres::parse_centromeres_file;
use crate::parsing::source::{parse_source_file, SourceData};
use crate::parsing::ParseError;

/// Number of datasets loaded at the same time
pub const FETCH_WORKERS: usize = 3;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Fetch worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to start fetch runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// One dataset to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchJob {
    /// A source dataset with band data for many organisms
    Source(PathBuf),
    /// Centromere coordinates for one organism
    Centromeres { organism: OrganismId, path: PathBuf },
}

/// Result of loading one source dataset
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub data: SourceData,
    pub elapsed: Duration,
}

impl SourceReport {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }
}

/// Result of loading one centromere table
#[derive(Debug, Clone)]
pub struct CentromereReport {
    pub organism: OrganismId,
    pub centromeres: CentromereMap,
    pub elapsed: Duration,
}

#[derive(Debug)]
enum Fetched {
    Source(SourceReport),
    Centromeres(CentromereReport),
}

/// Everything the fan-out produced, reduced after all workers finished
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Loaded sources, in the order their jobs were given
    pub sources: Vec<SourceReport>,

    /// Centromere maps per organism
    pub centromeres: BTreeMap<OrganismId, CentromereMap>,

    /// Datasets that could not be loaded
    pub failures: Vec<FetchError>,
}

impl FetchOutcome {
    /// Databases no source could map to a GenBank assembly
    #[must_use]
    pub fn unmapped_dbs(&self) -> Vec<&str> {
        self.sources
            .iter()
            .flat_map(|report| report.data.unmapped_dbs.iter().map(String::as_str))
            .collect()
    }

    /// Log per-source timings and unmapped databases
    pub fn log_summary(&self) {
        for report in &self.sources {
            info!(
                "Source {}: {} organisms in {:.2?}",
                report.name(),
                report.data.organisms.len(),
                report.elapsed
            );
        }
        let unmapped = self.unmapped_dbs();
        if !unmapped.is_empty() {
            info!(
                "Databases not mapped to GenBank assembly IDs: {}",
                unmapped.join(", ")
            );
        }
        for failure in &self.failures {
            warn!("{failure}");
        }
    }
}

/// Load all datasets concurrently on a pool of [`FETCH_WORKERS`] threads.
///
/// A dataset that fails to load is recorded in [`FetchOutcome::failures`]
/// and does not stop the others.
///
/// Must not be called from inside a Tokio runtime.
///
/// # Errors
///
/// Returns `FetchError::Runtime` if the worker pool cannot be started, or
/// `FetchError::Join` if a worker panics.
pub fn fetch_all(jobs: Vec<FetchJob>) -> Result<FetchOutcome, FetchError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(FETCH_WORKERS)
        .enable_all()
        .build()
        .map_err(FetchError::Runtime)?;

    runtime.block_on(fetch_jobs(jobs))
}

async fn fetch_jobs(jobs: Vec<FetchJob>) -> Result<FetchOutcome, FetchError> {
    let mut tasks = JoinSet::new();
    for (index, job) in jobs.into_iter().enumerate() {
        tasks.spawn_blocking(move || (index, run_job(job)));
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(index, _)| *index);

    let mut outcome = FetchOutcome::default();
    for (_, result) in results {
        match result {
            Ok(Fetched::Source(report)) => outcome.sources.push(report),
            Ok(Fetched::Centromeres(report)) => {
                debug!(
                    "Centromeres for {}: {} chromosomes in {:.2?}",
                    report.organism,
                    report.centromeres.len(),
                    report.elapsed
                );
                outcome
                    .centromeres
                    .insert(report.organism, report.centromeres);
            }
            Err(e) => outcome.failures.push(e),
        }
    }
    Ok(outcome)
}

fn run_job(job: FetchJob) -> Result<Fetched, FetchError> {
    let started = Instant::now();
    match job {
        FetchJob::Source(path) => {
            debug!("Loading source {}", path.display());
            let data = parse_source_file(&path).map_err(|source| FetchError::Load {
                path: path.clone(),
                source,
            })?;
            Ok(Fetched::Source(SourceReport {
                data,
                elapsed: started.elapsed(),
            }))
        }
        FetchJob::Centromeres { organism, path } => {
            debug!("Loading centromeres for {organism} from {}", path.display());
            let centromeres = parse_centromeres_file(&path).map_err(|source| FetchError::Load {
                path: path.clone(),
                source,
            })?;
            Ok(Fetched::Centromeres(CentromereReport {
                organism,
                centromeres,
                elapsed: started.elapsed(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_source(dir: &std::path::Path, name: &str, organism: &str) -> PathBuf {
        let path = dir.join(format!("{name}.json"));
        let json = serde_json::json!({
            "organisms": {
                organism: [{
                    "genbank_accession": "GCA_1",
                    "db": format!("{name}_db"),
                    "bands": { "1": [["p1", "1", "10", "1", "10", "gneg"]] }
                }]
            },
            "unmapped_dbs": [format!("{name}_unmapped")]
        });
        fs::write(&path, json.to_string()).unwrap();
        path
    }

    #[test]
    fn test_fetch_all_keeps_job_order() {
        let dir = tempfile::tempdir().unwrap();
        let jobs: Vec<FetchJob> = ["ensembl", "ucsc", "third", "fourth"]
            .iter()
            .map(|name| FetchJob::Source(write_source(dir.path(), name, "homo-sapiens")))
            .collect();

        let outcome = fetch_all(jobs).unwrap();
        let names: Vec<&str> = outcome.sources.iter().map(SourceReport::name).collect();
        assert_eq!(names, vec!["ensembl", "ucsc", "third", "fourth"]);
        assert_eq!(
            outcome.unmapped_dbs(),
            vec![
                "ensembl_unmapped",
                "ucsc_unmapped",
                "third_unmapped",
                "fourth_unmapped"
            ]
        );
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn test_fetch_all_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_source(dir.path(), "ucsc", "homo-sapiens");
        let centromere_path = dir.path().join("zea-mays.tsv");
        fs::write(&centromere_path, "1\t100\t200\n").unwrap();

        let jobs = vec![
            FetchJob::Source(dir.path().join("missing.json")),
            FetchJob::Source(good),
            FetchJob::Centromeres {
                organism: OrganismId::new("zea-mays"),
                path: centromere_path,
            },
        ];

        let outcome = fetch_all(jobs).unwrap();
        assert_eq!(outcome.sources.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(matches!(outcome.failures[0], FetchError::Load { .. }));
        assert_eq!(
            outcome.centromeres[&OrganismId::new("zea-mays")].len(),
            1
        );
    }
}
