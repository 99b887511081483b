//! Input validation.

use crate::error::{Result, ValidationError};

/// Why `name` cannot be used as an environment variable, or `None` if it can.
///
/// Shell-portable names only: ASCII letters, digits and `_`, not starting
/// with a digit. Anything else would not survive `export` in a dotenv file.
pub fn var_name_problem(name: &str) -> Option<String> {
    let first = match name.chars().next() {
        Some(first) => first,
        None => return Some("cannot be empty".to_string()),
    };

    if first.is_ascii_digit() {
        return Some("cannot start with a digit".to_string());
    }

    name.chars()
        .find(|&ch| !ch.is_ascii_alphanumeric() && ch != '_')
        .map(|ch| format!("'{}' is not allowed", ch.escape_debug()))
}

/// Validate that a value is not empty or whitespace.
///
/// # Errors
///
/// Returns `ValidationError::EmptyValue` naming `what`.
pub fn validate_value(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyValue(what.to_string()).into());
    }

    Ok(())
}
