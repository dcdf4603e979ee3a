use std::path::Path;

use crate::core::band::Centromere;
use crate::core::chromosome::CentromereMap;
use crate::parsing::{data_fields, read_text, ParseError};

/// Parse a centromere table file (optionally gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_centromeres_file(path: &Path) -> Result<CentromereMap, ParseError> {
    let content = read_text(path)?;
    parse_centromeres_text(&content)
}

/// Parse centromere table text with columns: `chrom start stop`
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for short rows, non-numeric positions,
/// duplicated chromosomes, or an empty table, and `ParseError::Band` for a
/// centromere too short to split.
pub fn parse_centromeres_text(text: &str) -> Result<CentromereMap, ParseError> {
    let mut centromeres = CentromereMap::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let Some(fields) = data_fields(line) else {
            continue;
        };
        let line_num = i + 1;
        let is_first = std::mem::replace(&mut first_data_line, false);

        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let chromosome = fields[0];
        let (Ok(start), Ok(stop)) = (fields[1].parse::<u64>(), fields[2].parse::<u64>()) else {
            if is_first {
                // Header row
                continue;
            }
            return Err(ParseError::InvalidFormat(format!(
                "Invalid centromere position on line {line_num}: '{}' '{}'",
                fields[1], fields[2]
            )));
        };

        if centromeres.get(chromosome).is_some() {
            return Err(ParseError::InvalidFormat(format!(
                "Duplicate centromere for chromosome {chromosome} on line {line_num}"
            )));
        }

        let centromere = Centromere::new(chromosome, start, stop).map_err(|source| {
            ParseError::Band {
                line: line_num,
                source,
            }
        })?;
        centromeres.insert(chromosome, centromere);
    }

    if centromeres.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No centromeres found in file".to_string(),
        ));
    }

    Ok(centromeres)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_centromeres_text() {
        let tsv = "chrom\tstart\tstop\n1\t136770000\t137120000\n2\t95510000\t95850000\n";
        let centromeres = parse_centromeres_text(tsv).unwrap();
        assert_eq!(centromeres.len(), 2);
        assert_eq!(
            centromeres.get("1"),
            Some(&Centromere {
                start: 136_770_000,
                stop: 137_120_000
            })
        );
    }

    #[test]
    fn test_parse_centromeres_rejects_duplicates() {
        let tsv = "1\t100\t200\n1\t300\t400\n";
        assert!(matches!(
            parse_centromeres_text(tsv),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_centromeres_rejects_bad_positions() {
        assert!(parse_centromeres_text("1\t100\t200\n2\tabc\t300\n").is_err());
        assert!(matches!(
            parse_centromeres_text("1\t200\t100\n"),
            Err(ParseError::Band { line: 1, .. })
        ));
    }
}
