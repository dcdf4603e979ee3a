use tracing::debug;

use crate::arms::passthrough;
use crate::core::band::Band;
use crate::core::chromosome::ChromosomeBands;
use crate::core::types::Arm;

/// Assign arms from centromere bands embedded in the stain data.
///
/// If no band in the organism has an `acen` stain the bands are returned with
/// every arm unassigned. Otherwise, in each chromosome the last `acen` band is
/// the pivot: bands before it are `p`, the pivot and everything after are `q`.
/// A chromosome without any `acen` band is left unassigned.
#[must_use]
pub fn parse_centromeres(bands: &ChromosomeBands) -> ChromosomeBands {
    if !bands.has_centromere_marker() {
        debug!("No embedded centromere bands, leaving arms unassigned");
        return passthrough(bands);
    }

    bands
        .iter()
        .map(|(chromosome, chromosome_bands)| {
            (chromosome.to_string(), split_at_pivot(chromosome, chromosome_bands))
        })
        .collect()
}

fn split_at_pivot(chromosome: &str, bands: &[Band]) -> Vec<Band> {
    let pivot = bands.iter().rposition(Band::is_centromeric);
    if pivot.is_none() {
        debug!("Chromosome {chromosome}: no acen band, arms left unassigned");
    }

    bands
        .iter()
        .enumerate()
        .map(|(i, band)| {
            let arm = match pivot {
                Some(pivot) if i < pivot => Arm::P,
                Some(_) => Arm::Q,
                None => Arm::Unassigned,
            };
            band.clone().with_arm(arm)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, start: &str, stop: &str, stain: &str) -> Band {
        Band::parse("1", &[name, start, stop, start, stop, stain]).unwrap()
    }

    fn arms(bands: &ChromosomeBands, chromosome: &str) -> Vec<Arm> {
        bands
            .get(chromosome)
            .unwrap()
            .iter()
            .map(|band| band.arm)
            .collect()
    }

    fn with_centromere() -> ChromosomeBands {
        let mut bands = ChromosomeBands::new();
        bands.insert(
            "1",
            vec![
                raw("p12", "1", "10", "gneg"),
                raw("p11", "11", "20", "acen"),
                raw("q11", "21", "30", "acen"),
                raw("q12", "31", "40", "gpos"),
            ],
        );
        bands
    }

    #[test]
    fn test_pivot_is_last_acen_band() {
        let parsed = parse_centromeres(&with_centromere());
        assert_eq!(arms(&parsed, "1"), vec![Arm::P, Arm::P, Arm::Q, Arm::Q]);
    }

    #[test]
    fn test_acen_bands_are_kept() {
        let parsed = parse_centromeres(&with_centromere());
        assert_eq!(parsed.band_count(), 4);
        assert_eq!(parsed.get("1").unwrap()[1].stain, "acen");
    }

    #[test]
    fn test_chromosome_without_pivot_is_unassigned() {
        let mut bands = with_centromere();
        bands.insert("2", vec![raw("q1", "1", "10", "gneg")]);

        let parsed = parse_centromeres(&bands);
        assert_eq!(arms(&parsed, "2"), vec![Arm::Unassigned]);
        assert_eq!(arms(&parsed, "1"), vec![Arm::P, Arm::P, Arm::Q, Arm::Q]);
    }

    #[test]
    fn test_no_marker_passes_through() {
        let mut bands = ChromosomeBands::new();
        bands.insert(
            "1",
            vec![raw("b1", "1", "10", "gneg"), raw("b2", "11", "20", "gpos")],
        );

        let parsed = parse_centromeres(&bands);
        assert_eq!(parsed, bands);
        assert_eq!(
            parsed.collapse(),
            vec!["1  b1 1 10 1 10 gneg", "1  b2 11 20 11 20 gpos"]
        );
    }

    #[test]
    fn test_parse_twice_is_stable() {
        let once = parse_centromeres(&with_centromere());
        let twice = parse_centromeres(&once);
        assert_eq!(once, twice);
    }
}
