//! Boundary-safe identifier rewriting
//!
//! A rename of `javax.foo` must not touch `javax.foobar` or `com.javax.foo`.
//! Each rule is applied in one left-to-right pass that copies unmatched spans
//! and substituted spans into a fresh buffer; the next rule then runs over
//! that buffer.

use crate::rule::RenameRule;
use crate::table::RenameTable;
use featshift_ident::{is_identifier_char, is_package_continuation};

/// Applies rename tables to text
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryMatcher;

impl BoundaryMatcher {
    /// Create new matcher instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Apply every rule of `table`, in order, to `text`
    #[must_use]
    pub fn rewrite(&self, text: &str, table: &RenameTable) -> String {
        let mut current = text.to_string();
        for rule in table {
            current = self.apply_rule(&current, rule);
        }
        current
    }

    /// Apply a single rule to every true match in `text`
    ///
    /// Scanning resumes right after each substituted value, so a value that
    /// contains the key is never rewritten again.
    #[must_use]
    pub fn apply_rule(&self, text: &str, rule: &RenameRule) -> String {
        let old = rule.key.stem();
        if old.is_empty() || old.len() > text.len() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        let mut search_from = 0;

        while let Some(offset) = text[search_from..].find(old) {
            let start = search_from + offset;
            let end = start + old.len();

            // out + text[cursor..start] is the rewritten prefix
            let before = text[cursor..start]
                .chars()
                .next_back()
                .or_else(|| out.chars().next_back());

            if Self::is_true_match(before, &text[end..], rule.is_wildcard()) {
                out.push_str(&text[cursor..start]);
                out.push_str(&rule.value);
                cursor = end;
                search_from = end;
            } else {
                let step = text[start..].chars().next().map_or(1, char::len_utf8);
                search_from = start + step;
            }
        }

        out.push_str(&text[cursor..]);
        out
    }

    /// Decide whether an occurrence stands on identifier boundaries
    ///
    /// - `before`: character preceding the occurrence, if any
    /// - `rest`: text following the occurrence
    /// - `wildcard`: whether sub-packages of the key also match
    #[must_use]
    pub fn is_true_match(before: Option<char>, rest: &str, wildcard: bool) -> bool {
        if before.is_some_and(|c| is_identifier_char(c) || c == '.') {
            return false;
        }

        let mut after = rest.chars();
        match after.next() {
            Some(c) if is_identifier_char(c) => false,
            Some('.') if !wildcard => !after.next().is_some_and(is_package_continuation),
            _ => true,
        }
    }
}
