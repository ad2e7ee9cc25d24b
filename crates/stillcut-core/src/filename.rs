//! Filename rules
//!
//! A stored image is addressed by a bare token: ASCII letters, digits and
//! hyphens only. No dots or separators, so a token can never escape the
//! storage directory. Upload and render paths both go through this check.

/// Returns true when `name` is a non-empty run of `[A-Za-z0-9-]`.
pub fn is_valid_filename(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}
