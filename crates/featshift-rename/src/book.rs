//! Rename tables keyed by target specification version
//!
//! A table registered for a version also serves every later version until
//! another table is registered, so the `javax → jakarta` table registered
//! for EE9 applies to EE10 and EE11 as well.
//!
//! Rule files are layered: their rules run after the inherited ones, for
//! their version and every later one.

use crate::error::RenameError;
use crate::table::RenameTable;
use featshift_ident::SpecVersion;
use std::collections::BTreeMap;
use std::path::Path;

/// Package renames for the move to the `jakarta` namespace
///
/// Exact keys cover packages whose sub-packages stay in the JDK
/// (`javax.annotation.processing`, `javax.transaction.xa`).
pub const JAKARTA_RENAMES: &[(&str, &str)] = &[
    ("javax.activation", "jakarta.activation"),
    ("javax.annotation", "jakarta.annotation"),
    ("javax.annotation.security", "jakarta.annotation.security"),
    ("javax.annotation.sql", "jakarta.annotation.sql"),
    ("javax.batch.*", "jakarta.batch"),
    ("javax.decorator", "jakarta.decorator"),
    ("javax.ejb.*", "jakarta.ejb"),
    ("javax.el", "jakarta.el"),
    ("javax.enterprise.*", "jakarta.enterprise"),
    ("javax.faces.*", "jakarta.faces"),
    ("javax.inject", "jakarta.inject"),
    ("javax.interceptor", "jakarta.interceptor"),
    ("javax.jms", "jakarta.jms"),
    ("javax.json.*", "jakarta.json"),
    ("javax.mail.*", "jakarta.mail"),
    ("javax.persistence.*", "jakarta.persistence"),
    ("javax.resource.*", "jakarta.resource"),
    ("javax.security.auth.message.*", "jakarta.security.auth.message"),
    ("javax.security.enterprise.*", "jakarta.security.enterprise"),
    ("javax.security.jacc", "jakarta.security.jacc"),
    ("javax.servlet.*", "jakarta.servlet"),
    ("javax.transaction", "jakarta.transaction"),
    ("javax.validation.*", "jakarta.validation"),
    ("javax.websocket.*", "jakarta.websocket"),
    ("javax.ws.rs.*", "jakarta.ws.rs"),
    ("javax.xml.bind.*", "jakarta.xml.bind"),
    ("javax.xml.soap", "jakarta.xml.soap"),
    ("javax.xml.ws.*", "jakarta.xml.ws"),
];

/// Rename tables by the first specification version they apply to
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    tables: BTreeMap<SpecVersion, RenameTable>,
}

impl RuleBook {
    /// Create empty book
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Create book with the built-in jakarta table registered for EE9
    #[must_use]
    pub fn builtin() -> Self {
        let mut book = Self::new();
        book.register(SpecVersion::Ee9, RenameTable::from_pairs(JAKARTA_RENAMES.iter().copied()));
        book
    }

    /// Register a table starting at `version`, replacing any previous one
    pub fn register(&mut self, version: SpecVersion, table: RenameTable) {
        self.tables.insert(version, table);
    }

    /// Append `extra` to the table serving `version` and to every table
    /// registered for a later version
    ///
    /// When no table starts exactly at `version`, one is started there from
    /// a copy of the inherited table.
    pub fn layer(&mut self, version: SpecVersion, extra: &RenameTable) {
        if !self.tables.contains_key(&version) {
            let inherited = self.for_version(version).cloned().unwrap_or_default();
            self.tables.insert(version, inherited);
        }
        for table in self.tables.range_mut(version..).map(|(_, table)| table) {
            table.extend(extra);
        }
    }

    /// Load a rule file and layer it from `version` on
    ///
    /// With `strict` unset, bad lines are skipped and an unreadable file
    /// adds nothing, so inherited rules keep applying.
    ///
    /// # Errors
    /// Only in strict mode: any error from [`RenameTable::load`]
    pub fn load_file(
        &mut self,
        version: SpecVersion,
        path: impl AsRef<Path>,
        strict: bool,
    ) -> Result<(), RenameError> {
        let extra = if strict {
            RenameTable::load(path)?
        } else {
            RenameTable::load_or_empty(path)
        };
        self.layer(version, &extra);
        Ok(())
    }

    /// Table that applies when targeting `version`
    ///
    /// Returns the table registered for the greatest version not newer than
    /// `version`, or `None` if no table starts at or before it.
    #[must_use]
    pub fn for_version(&self, version: SpecVersion) -> Option<&RenameTable> {
        self.tables
            .range(..=version)
            .next_back()
            .map(|(_, table)| table)
    }

    /// Number of registered tables
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if no tables are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::BoundaryMatcher;
    use std::io::Write;

    #[test]
    fn builtin_applies_from_ee9() {
        let book = RuleBook::builtin();
        assert!(book.for_version(SpecVersion::Ee8).is_none());
        assert!(book.for_version(SpecVersion::Ee9).is_some());
        assert!(book.for_version(SpecVersion::Ee11).is_some());
    }

    #[test]
    fn later_registration_takes_over() {
        let mut book = RuleBook::builtin();
        book.register(SpecVersion::Ee11, RenameTable::from_pairs([("a", "b")]));

        assert_eq!(book.for_version(SpecVersion::Ee10).unwrap().len(), JAKARTA_RENAMES.len());
        assert_eq!(book.for_version(SpecVersion::Ee11).unwrap().len(), 1);
    }

    #[test]
    fn builtin_table_keeps_jdk_packages() {
        let book = RuleBook::builtin();
        let table = book.for_version(SpecVersion::Ee9).unwrap();
        let matcher = BoundaryMatcher::new();

        assert_eq!(
            matcher.rewrite("javax.transaction.xa.XAResource", table),
            "javax.transaction.xa.XAResource"
        );
        assert_eq!(
            matcher.rewrite("javax.transaction.RollbackException", table),
            "jakarta.transaction.RollbackException"
        );
        assert_eq!(
            matcher.rewrite("javax.servlet.jsp.JspException", table),
            "jakarta.servlet.jsp.JspException"
        );
    }

    #[test]
    fn load_file_lenient_and_strict() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.properties");

        let mut book = RuleBook::new();
        book.load_file(SpecVersion::Ee9, &missing, false).unwrap();
        assert!(book.for_version(SpecVersion::Ee9).unwrap().is_empty());

        assert!(book.load_file(SpecVersion::Ee10, &missing, true).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "javax.el=jakarta.el").unwrap();
        book.load_file(SpecVersion::Ee10, file.path(), true).unwrap();
        assert_eq!(book.for_version(SpecVersion::Ee10).unwrap().len(), 1);
    }

    #[test]
    fn missing_rule_file_keeps_inherited_rules() {
        let dir = tempfile::tempdir().unwrap();
        let mut book = RuleBook::builtin();
        book.load_file(SpecVersion::Ee10, dir.path().join("missing.properties"), false)
            .unwrap();

        let matcher = BoundaryMatcher::new();
        for version in [SpecVersion::Ee9, SpecVersion::Ee10, SpecVersion::Ee11] {
            let table = book.for_version(version).unwrap();
            assert_eq!(matcher.rewrite("javax.servlet.Servlet", table), "jakarta.servlet.Servlet");
        }
    }

    #[test]
    fn layered_rules_run_after_inherited_ones() {
        let mut book = RuleBook::builtin();
        book.register(SpecVersion::Ee11, RenameTable::from_pairs([("org.old", "org.eleven")]));
        book.layer(SpecVersion::Ee10, &RenameTable::from_pairs([("com.acme.legacy", "com.acme.modern")]));

        let matcher = BoundaryMatcher::new();
        let ee9 = book.for_version(SpecVersion::Ee9).unwrap();
        let ee10 = book.for_version(SpecVersion::Ee10).unwrap();
        let ee11 = book.for_version(SpecVersion::Ee11).unwrap();

        assert_eq!(ee9.len(), JAKARTA_RENAMES.len());
        assert_eq!(ee10.len(), JAKARTA_RENAMES.len() + 1);
        assert_eq!(
            matcher.rewrite("javax.el.ELContext com.acme.legacy.Api", ee10),
            "jakarta.el.ELContext com.acme.modern.Api"
        );
        assert_eq!(
            matcher.rewrite("org.old.A com.acme.legacy.Api", ee11),
            "org.eleven.A com.acme.modern.Api"
        );
        assert_eq!(matcher.rewrite("com.acme.legacy.Api", ee9), "com.acme.legacy.Api");
    }
}
