//! Centralized validation and helper functions.

use crate::core::band::BandError;

/// Maximum number of bands allowed in a single band table
pub const MAX_BANDS: usize = 1_000_000;

/// Longest organism identifier accepted as an output file stem
pub const MAX_ORGANISM_ID_LENGTH: usize = 128;

/// Check if adding another band would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new band.
///
/// # Errors
///
/// Returns `BandError::TooManyBands` if adding would exceed the limit.
pub fn check_band_limit(count: usize) -> Result<(), BandError> {
    if count >= MAX_BANDS {
        return Err(BandError::TooManyBands { limit: MAX_BANDS });
    }
    Ok(())
}

/// Organism identifier validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty organism identifier")]
    EmptyOrganismId,
    #[error("Organism identifier too long: exceeds {MAX_ORGANISM_ID_LENGTH} characters")]
    OrganismIdTooLong,
    #[error("Invalid organism identifier '{0}': only letters, digits, '-', '_' and '.' are allowed")]
    InvalidOrganismId(String),
}

/// Validate an organism identifier before it is used as an output file stem.
///
/// Identifiers are rejected rather than sanitized so that two organisms can
/// never be written to the same file:
/// - Must be non-empty and within the length limit
/// - Only ASCII letters, digits, `-`, `_` and `.`
/// - No leading `.` and no `..` (prevents hidden files and directory traversal)
///
/// # Errors
///
/// Returns `ValidationError::EmptyOrganismId` if the identifier is empty,
/// `ValidationError::OrganismIdTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidOrganismId` if it contains disallowed characters.
pub fn validate_organism_id(organism: &str) -> Result<(), ValidationError> {
    if organism.trim().is_empty() {
        return Err(ValidationError::EmptyOrganismId);
    }

    if organism.len() > MAX_ORGANISM_ID_LENGTH {
        return Err(ValidationError::OrganismIdTooLong);
    }

    let safe_chars = organism
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !safe_chars || organism.starts_with('.') || organism.contains("..") {
        return Err(ValidationError::InvalidOrganismId(organism.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_band_limit() {
        assert!(check_band_limit(100).is_ok());
        assert!(check_band_limit(MAX_BANDS - 1).is_ok());
        assert_eq!(
            check_band_limit(MAX_BANDS),
            Err(BandError::TooManyBands { limit: MAX_BANDS })
        );
        assert_eq!(
            BandError::TooManyBands { limit: MAX_BANDS }.to_string(),
            "Too many bands: exceeds maximum of 1000000"
        );
    }

    #[test]
    fn test_validate_organism_id_safe() {
        assert!(validate_organism_id("homo-sapiens").is_ok());
        assert!(validate_organism_id("zea-mays").is_ok());
        assert!(validate_organism_id("aspergillus_niger.v2").is_ok());
    }

    #[test]
    fn test_validate_organism_id_dangerous() {
        assert_eq!(
            validate_organism_id(""),
            Err(ValidationError::EmptyOrganismId)
        );
        assert!(validate_organism_id("../etc/passwd").is_err());
        assert!(validate_organism_id("..").is_err());
        assert!(validate_organism_id(".hidden").is_err());
        assert!(validate_organism_id("mus musculus").is_err());
        assert!(validate_organism_id("a\0b").is_err());
        assert_eq!(
            validate_organism_id(&"a".repeat(200)),
            Err(ValidationError::OrganismIdTooLong)
        );
    }
}
