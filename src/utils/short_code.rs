//! Short code and alias generation.
//!
//! Two kinds of identifiers exist for a link:
//!
//! - the **short code** (`short_url`), derived deterministically from the
//!   target URL via [`generate_code`]. Different URLs may map to the same code.
//! - the **alias** (`short_name`), chosen by the caller or generated by
//!   [`generate_alias`]. Aliases are unique and are what redirects resolve.

use base64::Engine as _;
use md5::{Digest, Md5};
use uuid::Uuid;

/// Number of base64 characters kept from the encoded digest.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Derives the short code for a URL.
///
/// Hashes the UTF-8 bytes with MD5 (not used for security), encodes the
/// 16-byte digest with the URL-safe base64 alphabet and keeps the first
/// [`SHORT_CODE_LENGTH`] characters, with any `=` padding in that prefix
/// trimmed.
///
/// # Examples
///
/// ```
/// use link_shortener::utils::short_code::generate_code;
///
/// assert_eq!(generate_code("https://example.com"), "yYTQaq");
/// ```
pub fn generate_code(original_url: &str) -> String {
    let digest = Md5::digest(original_url.as_bytes());
    let encoded = base64::engine::general_purpose::URL_SAFE.encode(digest);

    encoded[..SHORT_CODE_LENGTH.min(encoded.len())]
        .trim_end_matches('=')
        .to_string()
}

/// Generates a globally unique alias for links created without one.
///
/// The alias is a random v4 UUID in hyphenated form, 36 characters long.
/// Caller alias rules do not apply to it.
pub fn generate_alias() -> String {
    Uuid::new_v4().to_string()
}
