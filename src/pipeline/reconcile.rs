use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::arms::{self, ArmError};
use crate::core::band::BandError;
use crate::core::chromosome::CentromereMap;
use crate::core::types::{OrganismId, Strategy};
use crate::parsing::source::AssemblyBands;
use crate::pipeline::fetch::SourceReport;
use crate::policy::table::StrategyTable;
use crate::utils::validation::{validate_organism_id, ValidationError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Organism {organism}: {source}")]
    InvalidOrganism {
        organism: OrganismId,
        #[source]
        source: ValidationError,
    },

    #[error("Organism {organism}: no assemblies with band data")]
    NoAssemblies { organism: OrganismId },

    #[error("Organism {organism}: invalid band data: {source}")]
    InvalidBands {
        organism: OrganismId,
        #[source]
        source: BandError,
    },

    #[error("Organism {organism}: arm assignment with {strategy} failed: {source}")]
    Arms {
        organism: OrganismId,
        strategy: Strategy,
        #[source]
        source: ArmError,
    },
}

/// Assemblies for one organism, from the first source that provided it
#[derive(Debug, Clone)]
pub struct OrganismEntry<'a> {
    pub source: &'a str,
    pub assemblies: &'a [AssemblyBands],
}

/// Final band lines for one organism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledOrganism {
    pub organism: OrganismId,
    pub source: String,
    pub genbank_accession: String,
    pub db: String,
    pub strategy: Strategy,
    pub lines: Vec<String>,
}

/// An organism skipped because it could not be reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganismFailure {
    pub organism: OrganismId,
    pub error: ReconcileError,
}

/// Outcome of reconciling every organism
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    pub organisms: Vec<ReconciledOrganism>,
    pub failures: Vec<OrganismFailure>,
}

/// Reduce sources to one entry per organism.
///
/// Sources are visited in order and the first source providing an organism
/// wins; later sources' data for it is ignored.
#[must_use]
pub fn non_redundant_organisms(sources: &[SourceReport]) -> BTreeMap<&OrganismId, OrganismEntry<'_>> {
    let mut organisms = BTreeMap::new();
    for report in sources {
        debug!("Iterating organisms from {}", report.name());
        for (organism, assemblies) in &report.data.organisms {
            if organisms.contains_key(organism) {
                debug!("Already saw {organism}, ignoring data from {}", report.name());
                continue;
            }
            organisms.insert(
                organism,
                OrganismEntry {
                    source: report.name(),
                    assemblies,
                },
            );
        }
    }
    organisms
}

/// Pick the assembly with the greatest `(genbank_accession, db)`
#[must_use]
pub fn winning_assembly(assemblies: &[AssemblyBands]) -> Option<&AssemblyBands> {
    assemblies.iter().max_by(|a, b| a.rank_key().cmp(&b.rank_key()))
}

/// Validate an organism's winning assembly, assign arms, and collapse to lines.
///
/// # Errors
///
/// Returns a `ReconcileError` naming the organism if its identifier is not a
/// safe file stem, it has no assemblies, its bands are malformed, or arm
/// assignment fails.
pub fn reconcile_organism(
    organism: &OrganismId,
    entry: &OrganismEntry<'_>,
    strategy: Strategy,
    centromeres: Option<&CentromereMap>,
) -> Result<ReconciledOrganism, ReconcileError> {
    validate_organism_id(organism.as_str()).map_err(|source| ReconcileError::InvalidOrganism {
        organism: organism.clone(),
        source,
    })?;

    let assembly =
        winning_assembly(entry.assemblies).ok_or_else(|| ReconcileError::NoAssemblies {
            organism: organism.clone(),
        })?;

    let bands = assembly
        .parse_bands()
        .map_err(|source| ReconcileError::InvalidBands {
            organism: organism.clone(),
            source,
        })?;

    let labelled =
        arms::apply(strategy, &bands, centromeres).map_err(|source| ReconcileError::Arms {
            organism: organism.clone(),
            strategy,
            source,
        })?;

    debug!(
        "{organism}: {} chromosomes, {} bands after {strategy}",
        labelled.len(),
        labelled.band_count()
    );

    Ok(ReconciledOrganism {
        organism: organism.clone(),
        source: entry.source.to_string(),
        genbank_accession: assembly.genbank_accession.clone(),
        db: assembly.db.clone(),
        strategy,
        lines: labelled.collapse(),
    })
}

/// Reconcile every organism the sources provide.
///
/// A failing organism is logged and recorded; it never stops the others.
#[must_use]
pub fn reconcile_all(
    sources: &[SourceReport],
    centromeres: &BTreeMap<OrganismId, CentromereMap>,
    table: &StrategyTable,
) -> Reconciliation {
    let mut reconciliation = Reconciliation::default();

    for (organism, entry) in non_redundant_organisms(sources) {
        let strategy = table.strategy_for(organism);
        match reconcile_organism(organism, &entry, strategy, centromeres.get(organism)) {
            Ok(reconciled) => {
                info!(
                    "{organism}: {} bands from {} ({}, {strategy})",
                    reconciled.lines.len(),
                    reconciled.source,
                    reconciled.db
                );
                reconciliation.organisms.push(reconciled);
            }
            Err(error) => {
                warn!("Skipping {error}");
                reconciliation.failures.push(OrganismFailure {
                    organism: organism.clone(),
                    error,
                });
            }
        }
    }

    reconciliation
}
