//! Rename rules
//!
//! Provides [`RuleKey`], the exact-or-wildcard left side of a rule, and
//! [`RenameRule`], a key paired with its replacement.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Suffix that turns a key into a sub-package wildcard
pub const WILDCARD_SUFFIX: &str = ".*";

/// Left side of a rename rule
///
/// Decided once when the rule is loaded. A key written `com.old.*` becomes
/// `Prefix("com.old")` and also matches sub-packages such as
/// `com.old.util.Thing`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKey {
    /// Matches the identifier itself, or a class directly inside it
    Exact(String),

    /// Matches the identifier and any of its sub-packages
    Prefix(String),
}

impl RuleKey {
    /// Parse a raw key, detecting the `.*` wildcard suffix
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.strip_suffix(WILDCARD_SUFFIX) {
            Some(stem) => Self::Prefix(stem.to_string()),
            None => Self::Exact(raw.to_string()),
        }
    }

    /// Check if a raw key requests wildcard matching
    #[inline]
    #[must_use]
    pub fn is_wildcard_key(raw: &str) -> bool {
        raw.trim().ends_with(WILDCARD_SUFFIX)
    }

    /// Strip the wildcard suffix from a raw key
    #[inline]
    #[must_use]
    pub fn strip(raw: &str) -> &str {
        let raw = raw.trim();
        raw.strip_suffix(WILDCARD_SUFFIX).unwrap_or(raw)
    }

    /// Text searched for in the input
    #[inline]
    #[must_use]
    pub fn stem(&self) -> &str {
        match self {
            Self::Exact(stem) | Self::Prefix(stem) => stem,
        }
    }

    /// Check if this key matches sub-packages
    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Prefix(_))
    }
}

impl Display for RuleKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(stem) => f.write_str(stem),
            Self::Prefix(stem) => write!(f, "{stem}{WILDCARD_SUFFIX}"),
        }
    }
}

/// One `old → new` mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenameRule {
    /// What to look for
    pub key: RuleKey,
    /// Replacement text
    pub value: String,
}

impl RenameRule {
    /// Create rule from a raw key and replacement
    #[inline]
    #[must_use]
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: RuleKey::parse(key),
            value: value.into(),
        }
    }

    /// Check if this rule matches sub-packages
    #[inline]
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.key.is_wildcard()
    }
}

impl Display for RenameRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detects_wildcard() {
        assert_eq!(RuleKey::parse("com.old.*"), RuleKey::Prefix("com.old".to_string()));
        assert_eq!(RuleKey::parse("com.old"), RuleKey::Exact("com.old".to_string()));
        assert_eq!(RuleKey::parse(" com.old* "), RuleKey::Exact("com.old*".to_string()));
    }

    #[test]
    fn strip_and_wildcard_helpers() {
        assert!(RuleKey::is_wildcard_key("javax.servlet.*"));
        assert!(!RuleKey::is_wildcard_key("javax.servlet"));
        assert_eq!(RuleKey::strip("javax.servlet.*"), "javax.servlet");
        assert_eq!(RuleKey::strip("javax.servlet"), "javax.servlet");
    }

    #[test]
    fn rule_display() {
        let rule = RenameRule::new("javax.el.*", "jakarta.el");
        assert!(rule.is_wildcard());
        assert_eq!(rule.to_string(), "javax.el.*=jakarta.el");
    }
}
