use tracing::debug;

use crate::arms::ArmError;
use crate::core::band::{Band, Centromere, CENTROMERE_STAIN};
use crate::core::chromosome::{CentromereMap, ChromosomeBands};
use crate::core::types::Arm;

/// Assign arms using a separately supplied centromere per chromosome.
///
/// Bands ending before the centromere start are `p`, all others `q`. A `q`
/// band starting before the centromere stop overlaps it and is dropped, as is
/// one ending at or before the centromere stop, which `qcen` covers. At the
/// first surviving `q` band the preceding `p` band is stretched to end just
/// before the centromere, the `q` band is moved to start just after it, and
/// `pcen`/`qcen` bands are inserted between them.
///
/// # Errors
///
/// Returns `ArmError::MissingCentromere` if any chromosome has no entry in
/// `centromeres`.
pub fn merge_centromeres(
    bands: &ChromosomeBands,
    centromeres: &CentromereMap,
) -> Result<ChromosomeBands, ArmError> {
    debug!(
        "Merging {} centromeres into {} chromosomes",
        centromeres.len(),
        bands.len()
    );

    bands.map_chromosomes(|chromosome, chromosome_bands| {
        let centromere = centromeres
            .get(chromosome)
            .ok_or_else(|| ArmError::MissingCentromere {
                chromosome: chromosome.to_string(),
            })?;
        Ok(merge_chromosome(chromosome, chromosome_bands, centromere))
    })
}

fn merge_chromosome(chromosome: &str, bands: &[Band], centromere: &Centromere) -> Vec<Band> {
    let mut merged: Vec<Band> = Vec::with_capacity(bands.len() + 2);
    let mut centromere_inserted = false;
    let mut dropped = 0usize;

    for band in bands {
        if band.bp_stop < centromere.start {
            merged.push(band.clone().with_arm(Arm::P));
            continue;
        }

        if band.bp_start < centromere.stop || band.bp_stop <= centromere.stop {
            debug!(
                "Chromosome {chromosome}: dropping band {} ({}-{}) overlapping centromere",
                band.name, band.bp_start, band.bp_stop
            );
            dropped += 1;
            continue;
        }

        if centromere_inserted {
            merged.push(band.clone().with_arm(Arm::Q));
            continue;
        }

        if let Some(last_p) = merged.pop() {
            merged.push(last_p.with_stop(centromere.start.saturating_sub(1)));
        }
        merged.extend(centromere_bands(centromere));
        merged.push(
            band.clone()
                .with_arm(Arm::Q)
                .with_start(centromere.stop + 1),
        );
        centromere_inserted = true;
    }

    if !centromere_inserted {
        debug!("Chromosome {chromosome}: no q-arm band after the centromere, nothing inserted");
    }
    if dropped > 0 {
        debug!("Chromosome {chromosome}: dropped {dropped} bands overlapping the centromere");
    }

    merged
}

/// The `pcen` and `qcen` bands spanning a centromere
fn centromere_bands(centromere: &Centromere) -> [Band; 2] {
    let midpoint = centromere.midpoint();
    [
        Band::synthetic(
            Arm::P,
            "pcen",
            centromere.start,
            midpoint - 1,
            CENTROMERE_STAIN,
        ),
        Band::synthetic(Arm::Q, "qcen", midpoint, centromere.stop, CENTROMERE_STAIN),
    ]
}
