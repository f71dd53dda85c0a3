//! Size limits for form paths.

use crate::types::Segment;
use crate::PathError;

/// Maximum allowed path string length.
const MAX_PATH_STR_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

/// Largest array position a path may address. Writes never pad an array
/// past it.
pub const MAX_INDEX: usize = 65_535;

/// Validate a path string before parsing.
///
/// # Example
///
/// ```
/// use form_sync_path::validate_path_str;
///
/// validate_path_str("a.b[0]").unwrap();
/// validate_path_str(&"a".repeat(2000)).unwrap_err();
/// ```
pub fn validate_path_str(path: &str) -> Result<(), PathError> {
    if path.len() > MAX_PATH_STR_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(())
}

/// Validate a parsed path's depth and array positions.
pub fn validate_path(segments: &[Segment]) -> Result<(), PathError> {
    if segments.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    if segments
        .iter()
        .any(|segment| matches!(segment, Segment::Index(idx) if *idx > MAX_INDEX))
    {
        return Err(PathError::InvalidIndex);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_long_path_str() {
        let long = "a.".repeat(600) + "a";
        assert_eq!(validate_path_str(&long), Err(PathError::PathTooLong));
    }

    #[test]
    fn test_validate_depth() {
        let ok: Vec<Segment> = (0..256).map(Segment::Index).collect();
        assert!(validate_path(&ok).is_ok());

        let deep: Vec<Segment> = (0..300).map(Segment::Index).collect();
        assert_eq!(validate_path(&deep), Err(PathError::PathTooLong));
    }

    #[test]
    fn test_validate_index_limit() {
        assert!(validate_path(&[Segment::Index(MAX_INDEX)]).is_ok());
        assert_eq!(
            validate_path(&[Segment::key("a"), Segment::Index(MAX_INDEX + 1)]),
            Err(PathError::InvalidIndex)
        );
    }
}
