//! Validators for CLI argument values.
//!
//! Used with clap's `value_parser` so bad values fail at parse time with a
//! clear message instead of surfacing as empty analysis results.

/// Maximum accepted length for service and team names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Validate a service or team name argument.
///
/// Names must be non-empty after trimming, at most 100 characters, and
/// free of control characters.
pub fn validate_name(value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(format!("name cannot exceed {MAX_NAME_LENGTH} characters"));
    }

    if trimmed.chars().any(char::is_control) {
        return Err("name cannot contain control characters".to_string());
    }

    Ok(trimmed.to_string())
}

/// Validate a free-form description argument (non-empty, trimmed).
pub fn validate_description(value: &str) -> Result<String, String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err("description cannot be empty".to_string());
    }

    Ok(trimmed.to_string())
}
