//! Common validation utilities

/// Common validation functions
pub mod validators {
    use once_cell::sync::Lazy;
    use regex::Regex;

    static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .expect("email regex is valid")
    });

    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length (in characters) is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if a string matches a pattern
    pub fn matches_pattern(value: &str, pattern: &Regex) -> bool {
        pattern.is_match(value)
    }

    /// Check if an email address is syntactically valid
    pub fn is_valid_email(email: &str) -> bool {
        email.len() <= 254 && EMAIL_REGEX.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane.doe+leads@example.co.uk"));
        assert!(is_valid_email("a@b.io"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(length_between("héllo", 5, 5));
        assert!(!length_between("", 1, 10));
        assert!(!not_empty("   "));
    }
}
