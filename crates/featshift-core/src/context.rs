//! Shared read-only tables
//!
//! [`MigrationContext`] holds the feature-set catalog, the text rename
//! tables and the base-name renames. It is built once by
//! [`MigrationContext::load_catalog`] and then only borrowed, so any number
//! of workers can share it without locking.

use crate::error::Result;
use crate::settings::Settings;
use featshift_plan::{FeatureCatalog, VersionSelector};
use featshift_rename::RuleBook;
use featshift_resolve::{BaseNameRenames, FeatureResolver};

/// Catalog, rename tables and base-name renames
#[derive(Debug, Clone, Default)]
pub struct MigrationContext {
    catalog: FeatureCatalog,
    rules: RuleBook,
    renames: BaseNameRenames,
}

impl MigrationContext {
    /// Create context from parts
    #[must_use]
    pub fn new(catalog: FeatureCatalog, rules: RuleBook, renames: BaseNameRenames) -> Self {
        Self {
            catalog,
            rules,
            renames,
        }
    }

    /// Context with only the built-in tables
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(FeatureCatalog::builtin(), RuleBook::builtin(), BaseNameRenames::builtin())
    }

    /// Build the context described by `settings`
    ///
    /// Starts from the built-in tables. A configured catalog file replaces
    /// the built-in catalog; each rule file is layered on top of the rules
    /// already serving its version.
    ///
    /// # Errors
    /// - `CoreError::Plan` if the catalog file cannot be loaded
    /// - `CoreError::Rename` if a rule file cannot be loaded and
    ///   `strict_rules` is set
    pub fn load_catalog(settings: &Settings) -> Result<Self> {
        let catalog = match &settings.catalog {
            Some(path) => FeatureCatalog::load(path)?,
            None => FeatureCatalog::builtin(),
        };

        let mut rules = RuleBook::builtin();
        for source in &settings.rules {
            rules.load_file(source.spec_version, &source.path, settings.strict_rules)?;
        }

        tracing::debug!(
            feature_sets = catalog.len(),
            rule_tables = rules.len(),
            "Loaded migration context"
        );
        Ok(Self::new(catalog, rules, BaseNameRenames::builtin()))
    }

    /// Feature-set catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Text rename tables
    #[inline]
    #[must_use]
    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Base-name renames
    #[inline]
    #[must_use]
    pub fn renames(&self) -> &BaseNameRenames {
        &self.renames
    }

    /// Resolver over this context's renames
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> FeatureResolver<'_> {
        FeatureResolver::new(&self.renames)
    }

    /// Selector over this context's catalog
    #[inline]
    #[must_use]
    pub fn selector(&self) -> VersionSelector<'_> {
        VersionSelector::new(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::rewriter::ConfigRewriter;
    use featshift_ident::SpecVersion;
    use featshift_plan::{ConfigTargets, FeatureReplacementAction, TestMode, EE11_FEATURES};
    use featshift_rename::BoundaryMatcher;
    use std::io::Write;

    #[test]
    fn default_settings_use_builtin_tables() {
        let context = MigrationContext::load_catalog(&Settings::default()).unwrap();
        assert_eq!(context.catalog().len(), 5);
        assert!(context.rules().for_version(SpecVersion::Ee9).is_some());
        assert!(!context.renames().is_empty());
    }

    #[test]
    fn lenient_missing_rule_file_keeps_builtin_renames() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new().with_rules(SpecVersion::Ee10, dir.path().join("missing.properties"));

        let context = MigrationContext::load_catalog(&settings).unwrap();
        let rewriter = ConfigRewriter::new(&context);
        let ee11 = FeatureReplacementAction::for_feature_set(
            context.catalog(),
            context.catalog().require(EE11_FEATURES).unwrap(),
            ConfigTargets::All,
            TestMode::Lite,
        );
        assert_eq!(rewriter.rewrite_text(&ee11, "javax.servlet.Servlet"), "jakarta.servlet.Servlet");
    }

    #[test]
    fn extra_rule_file_adds_to_builtin_renames() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "com.acme.legacy com.acme.modern").unwrap();
        let settings = Settings::new().with_rules(SpecVersion::Ee10, file.path());

        let context = MigrationContext::load_catalog(&settings).unwrap();
        let matcher = BoundaryMatcher::new();
        let ee11 = context.rules().for_version(SpecVersion::Ee11).unwrap();
        assert_eq!(
            matcher.rewrite("javax.servlet.Servlet com.acme.legacy.Api", ee11),
            "jakarta.servlet.Servlet com.acme.modern.Api"
        );
        let ee9 = context.rules().for_version(SpecVersion::Ee9).unwrap();
        assert_eq!(matcher.rewrite("com.acme.legacy.Api", ee9), "com.acme.legacy.Api");
    }

    #[test]
    fn strict_missing_rule_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::new()
            .with_strict_rules(true)
            .with_rules(SpecVersion::Ee10, dir.path().join("missing.properties"));

        assert!(matches!(MigrationContext::load_catalog(&settings), Err(CoreError::Rename(_))));
    }

    #[test]
    fn catalog_file_replaces_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[feature_set]]\nid = \"ONLY\"\nfeatures = [\"servlet-6.0\"]").unwrap();

        let context = MigrationContext::load_catalog(&Settings::new().with_catalog(file.path())).unwrap();
        assert_eq!(context.catalog().len(), 1);
        assert!(context.catalog().by_id("ONLY").is_some());
    }
}
