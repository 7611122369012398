use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateUrl, ValidationError};

lazy_static! {
    /// Regex for phone numbers: digits with optional leading "+", spaces and hyphens
    /// - Valid: "1", "+92 300 1234567", "0300-1234567"
    /// - Invalid: "", "abc", "-123", "+"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{0,19}$").unwrap();

    /// Regex for national identity numbers (CNIC): digits with optional hyphens
    /// - Valid: "2", "35202-1234567-1", "3520212345671"
    /// - Invalid: "", "-35202", "ABC-123"
    pub static ref CNIC_REGEX: Regex = Regex::new(r"^[0-9][0-9\-]{0,19}$").unwrap();
}

const MAX_SELECTION_LENGTH: usize = 100;

/// Accepts an empty string (field not provided) or a well-formed URL
pub fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Invalid URL format".into()))
    }
}

/// Every entry must be non-empty, at most 100 characters and appear only once
pub fn validate_selections(values: &[String]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_SELECTION_LENGTH {
            return Err(ValidationError::new("selection_length")
                .with_message("Each selection must be 1-100 characters".into()));
        }
        if !seen.insert(trimmed.to_lowercase()) {
            return Err(ValidationError::new("selection_duplicate")
                .with_message(format!("Duplicate selection '{}'", trimmed).into()));
        }
    }
    Ok(())
}
