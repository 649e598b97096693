//! # Language Negotiation
//!
//! Resolves the content language of a request from its `Accept-Language`
//! header.
//!
//! Only the first listed language is considered and only its primary subtag
//! is kept: `en-GB,de;q=0.9` resolves to `en`. Quality weights are not
//! ranked. A missing or blank header resolves to [`DEFAULT_LANGUAGE`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Language used when the client does not state one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A lowercase ISO 639-1 style primary language subtag.
///
/// Never empty and free of separators (`-`, `,`, `;`) and whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse a single language tag, keeping only the primary subtag.
    ///
    /// Returns `None` if nothing usable remains.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.split(';').next().unwrap_or_default().trim();
        let primary = tag.split('-').next().unwrap_or_default().trim();
        if primary.is_empty() || primary.chars().any(|c| c.is_whitespace() || c == ',') {
            return None;
        }
        Some(Self(primary.to_lowercase()))
    }

    /// The fallback language.
    #[must_use]
    pub fn default_language() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_language()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resolve the request language from an `Accept-Language` header value.
#[must_use]
pub fn negotiate(accept_language: Option<&str>) -> LanguageCode {
    accept_language
        .and_then(|header| header.split(',').next())
        .and_then(LanguageCode::parse)
        .unwrap_or_default()
}

// =============================================================================
// TESTS
// =============================================================================
