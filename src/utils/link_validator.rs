//! Syntactic rules for link input.
//!
//! All rules are evaluated independently and every violation is reported,
//! keyed by field name.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Allowed characters for a caller-chosen alias.
static SHORT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Inclusive bounds on alias length, in characters.
pub const SHORT_NAME_MIN_LENGTH: usize = 3;
pub const SHORT_NAME_MAX_LENGTH: usize = 32;

/// A single broken rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("required")]
    Required,

    #[error("malformed URL")]
    MalformedUrl,

    #[error("length must be between 3 and 32 characters")]
    Length,

    #[error("may only contain letters, digits, hyphens and underscores")]
    InvalidCharacters,
}

/// Violations keyed by request field. Empty means valid.
pub type FieldViolations = BTreeMap<&'static str, Violation>;

/// Checks a target URL.
///
/// The URL must be non-empty and parse as an absolute URL with both a scheme
/// and a non-empty host. The stored value is sent verbatim as a `Location`
/// header, so whitespace and control characters are malformed even where the
/// URL parser would strip them.
pub fn check_original_url(original_url: &str) -> Option<Violation> {
    if original_url.is_empty() {
        return Some(Violation::Required);
    }
    if original_url
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Some(Violation::MalformedUrl);
    }

    match Url::parse(original_url) {
        Ok(url) if !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()) => {
            None
        }
        _ => Some(Violation::MalformedUrl),
    }
}

/// Checks a caller-supplied alias.
///
/// An empty alias is valid: it asks for a generated one.
pub fn check_short_name(short_name: &str) -> Option<Violation> {
    if short_name.is_empty() {
        return None;
    }

    let length = short_name.chars().count();
    if !(SHORT_NAME_MIN_LENGTH..=SHORT_NAME_MAX_LENGTH).contains(&length) {
        return Some(Violation::Length);
    }

    if !SHORT_NAME_REGEX.is_match(short_name) {
        return Some(Violation::InvalidCharacters);
    }

    None
}

/// Validates a full link request.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::link_validator::{validate, Violation};
///
/// let violations = validate("https://example.com", "ab");
/// assert_eq!(violations.get("short_name"), Some(&Violation::Length));
///
/// let violations = validate("https://example.com", "ab$");
/// assert_eq!(violations.get("short_name"), Some(&Violation::InvalidCharacters));
/// assert!(validate("https://example.com", "").is_empty());
/// ```
pub fn validate(original_url: &str, short_name: &str) -> FieldViolations {
    let mut violations = FieldViolations::new();

    if let Some(violation) = check_original_url(original_url) {
        violations.insert("original_url", violation);
    }
    if let Some(violation) = check_short_name(short_name) {
        violations.insert("short_name", violation);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        assert!(validate("https://example.com", "my-link_1").is_empty());
    }

    #[test]
    fn test_empty_short_name_is_valid() {
        assert!(validate("https://example.com", "").is_empty());
    }

    #[test]
    fn test_empty_url_only_violates_url() {
        let violations = validate("", "");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.get("original_url"), Some(&Violation::Required));
    }

    #[test]
    fn test_not_a_url() {
        let violations = validate("not-a-url", "");
        assert_eq!(
            violations.get("original_url"),
            Some(&Violation::MalformedUrl)
        );
    }

    #[test]
    fn test_url_without_host() {
        assert_eq!(
            check_original_url("mailto:someone@example.com"),
            Some(Violation::MalformedUrl)
        );
        assert_eq!(check_original_url("https://"), Some(Violation::MalformedUrl));
        assert_eq!(check_original_url("/relative/path"), Some(Violation::MalformedUrl));
    }

    #[test]
    fn test_url_with_whitespace_or_controls() {
        for raw in [
            "https://example.com/a\nb",
            "https://example.com/a\tb",
            " https://example.com",
            "https://example.com ",
            "https://exa mple.com",
            "https://example.com/\u{7f}",
        ] {
            assert_eq!(check_original_url(raw), Some(Violation::MalformedUrl), "{raw:?}");
        }
    }

    #[test]
    fn test_url_with_path_and_query() {
        assert_eq!(check_original_url("http://example.com:8080/a?b=c#d"), None);
    }

    #[test]
    fn test_short_name_too_short() {
        let violations = validate("https://example.com", "ab");
        assert_eq!(violations.get("short_name"), Some(&Violation::Length));
    }

    #[test]
    fn test_short_name_too_long() {
        let name = "a".repeat(33);
        assert_eq!(check_short_name(&name), Some(Violation::Length));
        assert_eq!(check_short_name(&"a".repeat(32)), None);
        assert_eq!(check_short_name("abc"), None);
    }

    #[test]
    fn test_short_name_invalid_characters() {
        let violations = validate("https://example.com", "ab$c");
        assert_eq!(
            violations.get("short_name"),
            Some(&Violation::InvalidCharacters)
        );
        assert_eq!(
            check_short_name("with space"),
            Some(Violation::InvalidCharacters)
        );
        assert_eq!(check_short_name("ссылка"), Some(Violation::InvalidCharacters));
    }

    #[test]
    fn test_three_char_name_with_bad_character() {
        // Length is fine, so the character rule reports.
        assert_eq!(check_short_name("ab$"), Some(Violation::InvalidCharacters));
    }

    #[test]
    fn test_violations_are_collected() {
        let violations = validate("not-a-url", "x");
        assert_eq!(violations.len(), 2);
        assert_eq!(
            violations.get("original_url"),
            Some(&Violation::MalformedUrl)
        );
        assert_eq!(violations.get("short_name"), Some(&Violation::Length));
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(Violation::Required.to_string(), "required");
        assert_eq!(Violation::MalformedUrl.to_string(), "malformed URL");
    }
}
