//! Feature identifiers and removal patterns
//!
//! Provides [`FeatureId`] for versioned feature short-names and
//! [`FeaturePattern`] for the exact-or-wildcard entries of a removal set.

use crate::error::IdentError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Lower-cased feature short-name
///
/// A feature is written `base-version` (`servlet-4.0`). Everything before the
/// first `-` is the base name; a name without `-` is versionless.
///
/// # Examples
/// - `servlet-4.0` → base `servlet`, version `4.0`
/// - `expressionLanguage-5.0` → stored as `expressionlanguage-5.0`
/// - `servlet` → versionless
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureId(String);

impl FeatureId {
    /// Create feature identifier, trimming and lower-casing the input
    ///
    /// # Errors
    /// - `IdentError::Empty` if nothing remains after trimming
    /// - `IdentError::InvalidCharacter` for whitespace, `*`, `,` and the like
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IdentError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdentError::Empty);
        }
        if let Some(ch) = trimmed.chars().find(|c| !is_feature_char(*c)) {
            return Err(IdentError::invalid_character(trimmed, ch));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    /// Identifier text (always lower-case)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base name before the first `-`, `None` when versionless
    #[inline]
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        self.0.split_once('-').map(|(base, _)| base)
    }

    /// Version after the first `-`, `None` when versionless
    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.0.split_once('-').map(|(_, version)| version)
    }

    /// Check if this identifier has no version part
    #[inline]
    #[must_use]
    pub fn is_versionless(&self) -> bool {
        !self.0.contains('-')
    }

    /// Check if the base name equals `base`, ignoring case
    #[inline]
    #[must_use]
    pub fn has_base_name(&self, base: &str) -> bool {
        self.base_name()
            .is_some_and(|own| own.eq_ignore_ascii_case(base))
    }
}

fn is_feature_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '.' | '_' | ':')
}

impl Display for FeatureId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FeatureId {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FeatureId {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureId> for String {
    fn from(id: FeatureId) -> Self {
        id.0
    }
}

impl AsRef<str> for FeatureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Entry of a removal set
///
/// Written with a trailing `*` the entry removes every feature that has the
/// text before the `*` as a strict prefix. The variant is decided once when
/// the pattern is parsed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FeaturePattern {
    /// Matches one feature exactly
    Exact(FeatureId),

    /// Matches features strictly longer than, and starting with, the stem
    Prefix(String),
}

impl FeaturePattern {
    /// Parse a pattern, lower-casing it
    ///
    /// # Errors
    /// - `IdentError::Empty` for an empty input or a bare `*`
    /// - `IdentError::InvalidCharacter` when the stem is not a valid feature name
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdentError> {
        let trimmed = raw.as_ref().trim();
        match trimmed.strip_suffix('*') {
            Some(stem) => {
                if stem.is_empty() {
                    return Err(IdentError::Empty);
                }
                if let Some(ch) = stem.chars().find(|c| !is_feature_char(*c)) {
                    return Err(IdentError::invalid_character(trimmed, ch));
                }
                Ok(Self::Prefix(stem.to_lowercase()))
            }
            None => FeatureId::new(trimmed).map(Self::Exact),
        }
    }

    /// Check if the pattern matches `id`
    #[must_use]
    pub fn matches(&self, id: &FeatureId) -> bool {
        match self {
            Self::Exact(exact) => exact == id,
            Self::Prefix(stem) => id.as_str().len() > stem.len() && id.as_str().starts_with(stem.as_str()),
        }
    }

    /// Check if this is a wildcard pattern
    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Prefix(_))
    }

    /// Base name used when looking up a replacement
    ///
    /// Exact patterns use [`FeatureId::base_name`]. Wildcards use the stem up
    /// to its first `-`, so `jsp-*` and `jsp*` both yield `jsp`.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Self::Exact(id) => id.base_name(),
            Self::Prefix(stem) => stem.split('-').next().filter(|base| !base.is_empty()),
        }
    }

    /// Check if a removal can be performed with this pattern
    ///
    /// A versionless exact identifier has no base name to replace, so it is
    /// not a valid removal entry.
    #[inline]
    #[must_use]
    pub fn is_removable(&self) -> bool {
        match self {
            Self::Exact(id) => !id.is_versionless(),
            Self::Prefix(_) => true,
        }
    }
}

impl Display for FeaturePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(id) => write!(f, "{id}"),
            Self::Prefix(stem) => write!(f, "{stem}*"),
        }
    }
}

impl FromStr for FeaturePattern {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FeaturePattern {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<FeaturePattern> for String {
    fn from(pattern: FeaturePattern) -> Self {
        pattern.to_string()
    }
}

impl From<FeatureId> for FeaturePattern {
    fn from(id: FeatureId) -> Self {
        Self::Exact(id)
    }
}
