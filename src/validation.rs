//! Input validation for task fields.
//!
//! Store files use one line per task and a single-character field
//! separator, so text fields must never contain either. These checks run
//! when a task is created; decoded tasks are trusted as-is.

use crate::error::TaskError;

/// Maximum allowed length for a task name.
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum allowed length for a task description.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validates a text field against the store line format.
///
/// A field is valid if:
/// - It is not empty (after trimming)
/// - It does not contain `delimiter`
/// - It does not contain a line break (`\n` or `\r`)
/// - It fits the length limit for its field
///
/// # Examples
///
/// ```
/// use taskboard::validation::validate_field;
///
/// assert!(validate_field("name", "Write report", '#').is_ok());
/// assert!(validate_field("name", "", '#').is_err());
/// assert!(validate_field("name", "a#b", '#').is_err());
/// ```
pub fn validate_field(field: &'static str, value: &str, delimiter: char) -> Result<(), TaskError> {
    let malformed = |reason: String| TaskError::MalformedRecord { field, reason };

    if value.trim().is_empty() {
        return Err(malformed("cannot be empty".to_string()));
    }

    if value.contains(delimiter) {
        return Err(malformed(format!(
            "cannot contain the field delimiter '{delimiter}'"
        )));
    }

    if value.contains('\n') || value.contains('\r') {
        return Err(malformed("cannot contain a line break".to_string()));
    }

    let max = if field == "name" {
        MAX_NAME_LENGTH
    } else {
        MAX_DESCRIPTION_LENGTH
    };
    let len = value.chars().count();
    if len > max {
        return Err(malformed(format!("too long: {len} characters (max {max})")));
    }

    Ok(())
}

/// Clap value parser for task names.
///
/// Checks against the default delimiter; the board re-validates with the
/// configured one.
pub fn clap_name_validator(s: &str) -> Result<String, String> {
    validate_field("name", s, crate::models::task::DEFAULT_DELIMITER)
        .map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Clap value parser for task descriptions.
pub fn clap_description_validator(s: &str) -> Result<String, String> {
    validate_field("description", s, crate::models::task::DEFAULT_DELIMITER)
        .map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_field_accepts_plain_text() {
        assert!(validate_field("name", "Buy milk", '#').is_ok());
        assert!(validate_field("description", "2% or whole, 1 litre", '#').is_ok());
    }

    #[test]
    fn test_validate_field_rejects_empty() {
        assert!(validate_field("name", "", '#').is_err());
        assert!(validate_field("name", "   ", '#').is_err());
    }

    #[test]
    fn test_validate_field_rejects_line_breaks() {
        assert!(validate_field("name", "a\nb", '#').is_err());
        assert!(validate_field("name", "a\r", '#').is_err());
    }

    #[test]
    fn test_validate_field_length_limits() {
        assert!(validate_field("name", &"a".repeat(MAX_NAME_LENGTH), '#').is_ok());
        assert!(validate_field("name", &"a".repeat(MAX_NAME_LENGTH + 1), '#').is_err());
        assert!(validate_field("description", &"a".repeat(MAX_DESCRIPTION_LENGTH), '#').is_ok());
        assert!(
            validate_field("description", &"a".repeat(MAX_DESCRIPTION_LENGTH + 1), '#').is_err()
        );
    }

    #[test]
    fn test_clap_validators() {
        assert_eq!(clap_name_validator("ok").unwrap(), "ok");
        assert!(clap_name_validator("no#pe").is_err());
        assert!(clap_description_validator("").is_err());
    }
}
