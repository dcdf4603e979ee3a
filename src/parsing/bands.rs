use std::path::Path;

use crate::core::band::{Band, RAW_BAND_FIELDS};
use crate::core::chromosome::{check_band_order, ChromosomeBands};
use crate::parsing::{data_fields, read_text, ParseError};
use crate::utils::validation::check_band_limit;

/// Parse a band table file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_bands_file(path: &Path) -> Result<ChromosomeBands, ParseError> {
    let content = read_text(path)?;
    parse_bands_text(&content)
}

/// Parse band table text with columns:
/// `chrom name bp_start bp_stop iscn_start iscn_stop stain`
///
/// Rows for one chromosome must be in ascending start order. A first row
/// whose first column is `chrom` or `chromosome` is treated as a header.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row has the wrong number of fields
/// or no bands are found, or `ParseError::Band` for malformed coordinates,
/// out-of-order bands or too many bands.
pub fn parse_bands_text(text: &str) -> Result<ChromosomeBands, ParseError> {
    let mut bands = ChromosomeBands::new();
    let mut count = 0usize;
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let Some(fields) = data_fields(line) else {
            continue;
        };

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "chrom" || first == "chromosome" {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() != RAW_BAND_FIELDS + 1 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected {}",
                fields.len(),
                RAW_BAND_FIELDS + 1
            )));
        }

        let chromosome = fields[0];
        let band = check_band_limit(count)
            .and_then(|()| Band::parse(chromosome, &fields[1..]))
            .and_then(|band| {
                let previous = bands.get(chromosome).and_then(<[Band]>::last);
                check_band_order(chromosome, previous, &band).map(|()| band)
            })
            .map_err(|source| ParseError::Band {
                line: line_num,
                source,
            })?;

        bands.push(chromosome, band);
        count += 1;
    }

    if bands.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No bands found in file".to_string(),
        ));
    }

    Ok(bands)
}
