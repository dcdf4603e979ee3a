//! Readers for band, centromere and source datasets.
//!
//! This module provides parsers for:
//!
//! - **Band tables**: tab-separated `chrom name bp_start bp_stop iscn_start iscn_stop stain`
//! - **Centromere tables**: tab-separated `chrom start stop`
//! - **Source datasets**: JSON documents holding every organism one data source provides
//!
//! Any file ending in `.gz` is decompressed transparently.
//!
//! ## Example
//!
//! ```rust
//! use cytobands::parsing::bands::parse_bands_text;
//!
//! let text = "1\tp36.33\t1\t2300000\t1\t100\tgneg\n1\tp36.32\t2300001\t5300000\t100\t200\tgpos25\n";
//! let bands = parse_bands_text(text).unwrap();
//! assert_eq!(bands.band_count(), 2);
//! ```

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

use crate::core::band::BandError;

pub mod bands;
pub mod centromeres;
pub mod source;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Line {line}: {source}")]
    Band {
        line: usize,
        #[source]
        source: BandError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Open a file for reading, decompressing it when the name ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead + Send>, ParseError> {
    let file = File::open(path)?;
    let gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    if gzipped {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read a whole (possibly gzipped) file into a string
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or is not UTF-8.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let mut content = String::new();
    open_text(path)?.read_to_string(&mut content)?;
    Ok(content)
}

/// Split a data line into trimmed fields, skipping blanks and `#` comments
pub(crate) fn data_fields(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split('\t').map(str::trim).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn test_read_gzipped_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bands.tsv.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"1\tp1\t1\t10\t1\t10\tgneg\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(read_text(&path).unwrap(), "1\tp1\t1\t10\t1\t10\tgneg\n");
    }

    #[test]
    fn test_data_fields_skips_comments() {
        assert!(data_fields("# comment").is_none());
        assert!(data_fields("   ").is_none());
        assert_eq!(data_fields("1\t2 \t3").unwrap(), vec!["1", "2", "3"]);
    }
}
