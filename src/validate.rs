//! Field validation for contact records
//!
//! Each validator is a pure function: it returns the trimmed input when it is
//! acceptable and a [`ValidationError`] describing the rejection otherwise.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum number of characters a trimmed phone number must have
pub const MIN_PHONE_LEN: usize = 10;

/// Why a field value was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Phone number may only contain digits, spaces, dashes, parentheses and '+'")]
    PhoneCharacters,

    #[error("Phone number must have at least 10 characters")]
    PhoneTooShort,

    #[error("Invalid email format")]
    EmailFormat,
}

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d\s\-()+]+$").expect("Invalid phone regex"));

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// Accept any name that is non-empty once trimmed
pub fn validate_name(input: &str) -> Result<&str, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name)
}

/// Accept phone numbers made of digits, whitespace, `-`, `(`, `)` and `+`
/// with at least [`MIN_PHONE_LEN`] characters after trimming.
pub fn validate_phone(input: &str) -> Result<&str, ValidationError> {
    let phone = input.trim();
    if !PHONE_PATTERN.is_match(phone) {
        return Err(ValidationError::PhoneCharacters);
    }
    if phone.chars().count() < MIN_PHONE_LEN {
        return Err(ValidationError::PhoneTooShort);
    }
    Ok(phone)
}

/// Accept `local@domain.tld` addresses with a tld of two or more letters
pub fn validate_email(input: &str) -> Result<&str, ValidationError> {
    let email = input.trim();
    if EMAIL_PATTERN.is_match(email) {
        Ok(email)
    } else {
        Err(ValidationError::EmailFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_accepts_dashes() {
        assert_eq!(validate_phone("555-123-4567"), Ok("555-123-4567"));
    }

    #[test]
    fn test_phone_accepts_parens_and_spaces() {
        assert_eq!(validate_phone("(555) 123 4567"), Ok("(555) 123 4567"));
    }

    #[test]
    fn test_phone_accepts_international() {
        assert!(validate_phone("+44 7911 123456").is_ok());
    }

    #[test]
    fn test_phone_rejects_short() {
        assert_eq!(validate_phone("12345"), Err(ValidationError::PhoneTooShort));
    }

    #[test]
    fn test_phone_rejects_letters() {
        assert_eq!(
            validate_phone("555-CALL-NOW"),
            Err(ValidationError::PhoneCharacters)
        );
    }

    #[test]
    fn test_phone_length_counts_after_trim() {
        assert_eq!(
            validate_phone("   123456789   "),
            Err(ValidationError::PhoneTooShort)
        );
        assert_eq!(validate_phone("  1234567890 "), Ok("1234567890"));
    }

    #[test]
    fn test_phone_rejects_empty() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("   ").is_err());
    }

    #[test]
    fn test_email_accepts_plus_and_subdomain() {
        assert_eq!(
            validate_email("a.b+c@sub.example.co"),
            Ok("a.b+c@sub.example.co")
        );
    }

    #[test]
    fn test_email_case_insensitive() {
        assert!(validate_email("ADA@EXAMPLE.COM").is_ok());
    }

    #[test]
    fn test_email_rejects_missing_at() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(ValidationError::EmailFormat)
        );
    }

    #[test]
    fn test_email_rejects_missing_tld() {
        assert_eq!(validate_email("a@b"), Err(ValidationError::EmailFormat));
        assert_eq!(validate_email("a@b.c"), Err(ValidationError::EmailFormat));
    }

    #[test]
    fn test_email_letters_are_ascii_only() {
        assert!(validate_email("a@b.\u{212A}\u{212A}").is_err());
        assert!(validate_email("\u{17F}@example.com").is_err());
        assert!(validate_email("caf\u{E9}@example.com").is_err());
    }

    #[test]
    fn test_email_rejects_numeric_tld() {
        assert!(validate_email("user@example.c0m").is_err());
    }

    #[test]
    fn test_name_trimmed() {
        assert_eq!(validate_name("  Ada  "), Ok("Ada"));
        assert_eq!(validate_name(" \t "), Err(ValidationError::EmptyName));
    }
}
