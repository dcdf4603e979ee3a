use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::band::{Band, BandError, Centromere};

/// Ordered bands for every chromosome of one organism.
///
/// Bands within a chromosome are kept in ascending coordinate order; the
/// strategies rely on that order and preserve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChromosomeBands {
    chromosomes: BTreeMap<String, Vec<Band>>,
}

impl ChromosomeBands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the band list for a chromosome
    pub fn insert(&mut self, chromosome: impl Into<String>, bands: Vec<Band>) {
        self.chromosomes.insert(chromosome.into(), bands);
    }

    /// Append a band to a chromosome, creating the chromosome if needed
    pub fn push(&mut self, chromosome: &str, band: Band) {
        self.chromosomes
            .entry(chromosome.to_string())
            .or_default()
            .push(band);
    }

    #[must_use]
    pub fn get(&self, chromosome: &str) -> Option<&[Band]> {
        self.chromosomes.get(chromosome).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Band])> {
        self.chromosomes
            .iter()
            .map(|(name, bands)| (name.as_str(), bands.as_slice()))
    }

    /// Number of chromosomes
    #[must_use]
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    /// Total number of bands across all chromosomes
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.chromosomes.values().map(Vec::len).sum()
    }

    /// Whether any band of any chromosome carries the centromere stain
    #[must_use]
    pub fn has_centromere_marker(&self) -> bool {
        self.chromosomes
            .values()
            .flatten()
            .any(Band::is_centromeric)
    }

    /// Build a new band list by transforming each chromosome independently
    pub fn map_chromosomes<F, E>(&self, mut f: F) -> Result<Self, E>
    where
        F: FnMut(&str, &[Band]) -> Result<Vec<Band>, E>,
    {
        let mut chromosomes = BTreeMap::new();
        for (name, bands) in &self.chromosomes {
            chromosomes.insert(name.clone(), f(name, bands)?);
        }
        Ok(Self { chromosomes })
    }

    /// Chromosome identifiers in natural order (`2` before `10`)
    #[must_use]
    pub fn chromosome_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chromosomes.keys().map(String::as_str).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    /// Flatten to output lines: chromosomes in natural order, bands in stored order
    #[must_use]
    pub fn collapse(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.band_count());
        for name in self.chromosome_names() {
            if let Some(bands) = self.chromosomes.get(name) {
                lines.extend(bands.iter().map(|band| band.to_line(name)));
            }
        }
        lines
    }
}

impl FromIterator<(String, Vec<Band>)> for ChromosomeBands {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Band>)>>(iter: I) -> Self {
        Self {
            chromosomes: iter.into_iter().collect(),
        }
    }
}

/// Check that `band` does not start before the band preceding it
///
/// # Errors
///
/// Returns `BandError::Unordered` if `band` starts before `previous`.
pub fn check_band_order(
    chromosome: &str,
    previous: Option<&Band>,
    band: &Band,
) -> Result<(), BandError> {
    match previous {
        Some(previous) if band.bp_start < previous.bp_start => Err(BandError::Unordered {
            chromosome: chromosome.to_string(),
            band: band.name.clone(),
            start: band.bp_start,
            previous_start: previous.bp_start,
        }),
        _ => Ok(()),
    }
}

/// Centromere coordinates keyed by chromosome identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CentromereMap {
    centromeres: BTreeMap<String, Centromere>,
}

impl CentromereMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, chromosome: impl Into<String>, centromere: Centromere) {
        self.centromeres.insert(chromosome.into(), centromere);
    }

    #[must_use]
    pub fn get(&self, chromosome: &str) -> Option<&Centromere> {
        self.centromeres.get(chromosome)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.centromeres.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.centromeres.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    while start < bytes.len() {
        let digit = bytes[start].is_ascii_digit();
        let end = bytes[start..]
            .iter()
            .position(|b| b.is_ascii_digit() != digit)
            .map_or(bytes.len(), |offset| start + offset);
        let piece = &s[start..end];
        out.push(if digit {
            Chunk::Number(piece)
        } else {
            Chunk::Text(piece)
        });
        start = end;
    }
    out
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compare chromosome names treating runs of digits as numbers.
///
/// Text runs compare case-insensitively, and a number sorts before text at
/// the same position, so `1 < 2 < 10 < X < Y`.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ordering = match (l, r) {
            (Chunk::Number(x), Chunk::Number(y)) => cmp_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}
