//! Input validation functions

use validator::ValidateEmail;

/// Returns the names of required fields whose values are empty.
///
/// A value made only of whitespace counts as empty.
pub fn missing_fields<'a>(fields: &[(&'a str, &str)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Parse a numeric identifier taken from a path or query string
///
/// Any integer is accepted; ids that name no row are left to the lookup.
pub fn parse_id(name: &str, raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(format!("{} is a required parameter", name));
    }
    raw.parse::<i64>().map_err(|_| format!("{} must be an integer", name))
}
