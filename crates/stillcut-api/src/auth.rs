//! Bearer-token gate for writes
//!
//! A single shared secret authorizes every upload. Reads are unauthenticated.

use subtle::ConstantTimeEq;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct BearerAuth {
    expected_header: String,
}

impl BearerAuth {
    pub fn new(token: &str) -> Self {
        Self {
            expected_header: format!("{}{}", BEARER_PREFIX, token),
        }
    }

    /// True iff `authorization` is exactly `Bearer <token>`.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match authorization {
            Some(header) if !header.is_empty() => secure_compare(header, &self.expected_header),
            _ => false,
        }
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
