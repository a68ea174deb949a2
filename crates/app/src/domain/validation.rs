//! Field checks shared by the domain services.

use std::sync::LazyLock;

use regex::Regex;

static PHONE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?1?\d{9,15}$").ok());

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Phone numbers carry 9 to 15 digits with an optional `+` and leading `1`.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

/// Trim a required text field, rejecting blank values.
pub fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_accepts_international_and_local_forms() {
        assert!(is_valid_phone("+254712345678"));
        assert!(is_valid_phone("0712345678"));
        assert!(is_valid_phone("+15551234567"));
    }

    #[test]
    fn phone_rejects_short_long_and_formatted_numbers() {
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+1234567890123456789"));
        assert!(!is_valid_phone("071-234-5678"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn email_requires_domain_with_dot() {
        assert!(is_valid_email("jane@example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("  Bakery "), Some("Bakery".to_string()));
        assert_eq!(required_text("   "), None);
    }
}
