//! Ordered rename tables
//!
//! Provides [`RenameTable`], loaded from a properties-style rule source.
//!
//! # Source format
//! - one mapping per line, the key ends at the first unescaped `=`, `:` or
//!   whitespace (`key=value`, `key:value`, `key value`, `key = value`)
//! - `\` escapes the next character of the key, so `a\=b=c` maps `a=b`
//! - blank lines and lines starting with `#` or `!` are ignored
//! - a key ending in `.*` requests sub-package matching
//! - a repeated key keeps its first position and takes the later value
//! - a key without a value is rejected, since it would erase package names

use crate::error::RenameError;
use crate::rule::{RenameRule, RuleKey};
use indexmap::IndexMap;
use std::path::Path;

/// Ordered collection of rename rules
///
/// Iteration follows declaration order. Rules are never sorted by
/// specificity; the matcher applies them exactly in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameTable {
    rules: IndexMap<String, RenameRule>,
}

impl RenameTable {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Build table from `(key, value)` pairs in order
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.insert(key, value);
        }
        table
    }

    /// Parse a properties-style rule source
    ///
    /// # Errors
    /// The first bad line:
    /// - `RenameError::MalformedLine` for a key without a value
    /// - `RenameError::EmptyKey` for a line such as `=jakarta.el`
    pub fn from_properties(source: &str) -> Result<Self, RenameError> {
        let (table, errors) = Self::parse_entries(source);
        match errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(table),
        }
    }

    /// Parse every good line, collecting errors for the bad ones
    fn parse_entries(source: &str) -> (Self, Vec<RenameError>) {
        let mut table = Self::new();
        let mut errors = Vec::new();

        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            match split_entry(line) {
                Some((key, _)) if key.is_empty() => errors.push(RenameError::EmptyKey { line: index + 1 }),
                Some((key, value)) if !value.is_empty() => table.insert(&key, value),
                _ => errors.push(RenameError::malformed(index + 1, line)),
            }
        }

        (table, errors)
    }

    /// Read and parse a rule file
    ///
    /// The file handle is released before parsing begins.
    ///
    /// # Errors
    /// - `RenameError::Io` if the file cannot be read
    /// - any error from [`RenameTable::from_properties`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenameError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|e| RenameError::io_error(path, e))?;
        let table = Self::from_properties(&source)?;
        tracing::debug!("Loaded {} rename rules from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read a rule file, skipping what cannot be used
    ///
    /// An unreadable file gives an empty table. Bad lines are logged and
    /// skipped; every good line is kept.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                let err = RenameError::io_error(path, e);
                tracing::warn!("Continuing with empty rename table for {}: {}", path.display(), err);
                return Self::new();
            }
        };

        let (table, errors) = Self::parse_entries(&source);
        for err in &errors {
            tracing::warn!("Skipping rule in {}: {}", path.display(), err);
        }
        tracing::debug!("Loaded {} rename rules from {}", table.len(), path.display());
        table
    }

    /// Append the rules of `other`, in its order
    ///
    /// A key already present keeps its position and takes the new value.
    pub fn extend(&mut self, other: &RenameTable) {
        for (key, rule) in &other.rules {
            self.rules.insert(key.clone(), rule.clone());
        }
    }

    /// Insert or update a rule
    ///
    /// Updating keeps the rule at its original position.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.rules
            .insert(key.to_string(), RenameRule::new(key, value));
    }

    /// Look up the rule declared under `key` (including any `.*` suffix)
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RenameRule> {
        self.rules.get(key.trim())
    }

    /// Check if `key` requests sub-package matching
    #[inline]
    #[must_use]
    pub fn is_wildcard(key: &str) -> bool {
        RuleKey::is_wildcard_key(key)
    }

    /// Remove the wildcard suffix from `key`
    #[inline]
    #[must_use]
    pub fn strip(key: &str) -> &str {
        RuleKey::strip(key)
    }

    /// Iterate rules in declaration order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &RenameRule> {
        self.rules.values()
    }

    /// Number of rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Split a trimmed line into its unescaped key and trimmed value
///
/// Returns `None` when the line has no separator.
fn split_entry(line: &str) -> Option<(String, &str)> {
    let mut key = String::new();
    let mut chars = line.char_indices();

    while let Some((at, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    key.push(escaped);
                }
            }
            '=' | ':' => return Some((key, line[at + 1..].trim())),
            c if c.is_whitespace() => {
                let rest = line[at..].trim_start();
                let rest = rest.strip_prefix(|c: char| c == '=' || c == ':').unwrap_or(rest);
                return Some((key, rest.trim()));
            }
            c => key.push(c),
        }
    }
    None
}

impl<'a> IntoIterator for &'a RenameTable {
    type Item = &'a RenameRule;
    type IntoIter = indexmap::map::Values<'a, String, RenameRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.values()
    }
}
