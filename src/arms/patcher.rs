use tracing::debug;

use crate::arms::label_all;
use crate::core::band::Band;
use crate::core::chromosome::ChromosomeBands;
use crate::core::types::Arm;

/// Name of the synthesized telomere band
pub const TELOMERE_BAND: &str = "pter";

/// Stain given to the synthesized telomere band
pub const TELOMERE_STAIN: &str = "gpos";

/// Ensure every chromosome's bands start at position 1, then label all bands `q`.
///
/// When the first band starts after 1, a `pter` band covering `1..start-1` is
/// inserted in front of it. The whole chromosome is reported as a single arm.
#[must_use]
pub fn patch_telomeres(bands: &ChromosomeBands) -> ChromosomeBands {
    let patched: ChromosomeBands = bands
        .iter()
        .map(|(chromosome, chromosome_bands)| {
            let mut out = Vec::with_capacity(chromosome_bands.len() + 1);
            if let Some(first) = chromosome_bands.first().filter(|band| band.bp_start > 1) {
                debug!(
                    "Chromosome {chromosome}: adding {TELOMERE_BAND} band 1-{}",
                    first.bp_start - 1
                );
                out.push(Band::synthetic(
                    Arm::Unassigned,
                    TELOMERE_BAND,
                    1,
                    first.bp_start - 1,
                    TELOMERE_STAIN,
                ));
            }
            out.extend(chromosome_bands.iter().cloned());
            (chromosome.to_string(), out)
        })
        .collect();

    label_all(&patched, Arm::Q)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, start: &str, stop: &str) -> Band {
        Band::parse("2L", &[name, start, stop, start, stop, "gneg"]).unwrap()
    }

    #[test]
    fn test_inserts_missing_telomere() {
        let mut bands = ChromosomeBands::new();
        bands.insert("2L", vec![raw("21A1", "50", "100")]);

        let patched = patch_telomeres(&bands);
        assert_eq!(
            patched.collapse(),
            vec!["2L q pter 1 49 1 49 gpos", "2L q 21A1 50 100 50 100 gneg"]
        );
    }

    #[test]
    fn test_no_telomere_when_starting_at_one() {
        let mut bands = ChromosomeBands::new();
        bands.insert("X", vec![raw("1A1", "1", "100"), raw("1A2", "101", "200")]);

        let patched = patch_telomeres(&bands);
        let chromosome = patched.get("X").unwrap();
        assert_eq!(chromosome.len(), 2);
        assert_eq!(chromosome[0].name, "1A1");
        assert!(chromosome.iter().all(|band| band.arm == Arm::Q));
    }

    #[test]
    fn test_empty_chromosome_stays_empty() {
        let mut bands = ChromosomeBands::new();
        bands.insert("4", Vec::new());

        let patched = patch_telomeres(&bands);
        assert_eq!(patched.get("4").unwrap().len(), 0);
    }
}
