//! Configuration rewriting
//!
//! [`ConfigRewriter`] applies one repeat step to configurations (feature
//! resolution) and to text artifacts (boundary-safe renames).
//!
//! # Concurrency
//!
//! Configurations are independent, so [`ConfigRewriter::apply_all`] and
//! [`ConfigRewriter::rewrite_texts`] fan out with rayon. The context is only
//! read.

use crate::configuration::Configuration;
use crate::context::MigrationContext;
use crate::error::Result;
use featshift_ident::FeatureId;
use featshift_plan::RepeatAction;
use featshift_rename::{BoundaryMatcher, RenameTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Features removed from and added to one configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigChange {
    /// Configuration name
    pub name: String,
    /// Features no longer present
    pub removed: Vec<FeatureId>,
    /// Features newly present
    pub added: Vec<FeatureId>,
}

impl ConfigChange {
    /// Check if nothing changed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Applies repeat steps to configurations and text
#[derive(Debug, Clone, Copy)]
pub struct ConfigRewriter<'a> {
    context: &'a MigrationContext,
    matcher: BoundaryMatcher,
}

impl<'a> ConfigRewriter<'a> {
    /// Create rewriter over `context`
    #[inline]
    #[must_use]
    pub fn new(context: &'a MigrationContext) -> Self {
        Self {
            context,
            matcher: BoundaryMatcher::new(),
        }
    }

    /// Apply `step` to one configuration
    ///
    /// Returns `None` when the step has no feature changes or does not
    /// target this configuration.
    ///
    /// # Errors
    /// `CoreError::Resolve` if the step removes a versionless feature; the
    /// configuration is left untouched
    pub fn apply(&self, step: &dyn RepeatAction, config: &mut Configuration) -> Result<Option<ConfigChange>> {
        let Some(changes) = step.changes() else {
            return Ok(None);
        };
        if !step.targets().includes(config.name()) {
            return Ok(None);
        }

        let before = config.features().clone();
        self.context.resolver().resolve_in_place(config.features_mut(), changes)?;

        let change = ConfigChange {
            name: config.name().to_string(),
            removed: before.difference(config.features()).cloned().collect(),
            added: config.features().difference(&before).cloned().collect(),
        };
        tracing::debug!(
            step = step.id(),
            config = config.name(),
            removed = ?change.removed,
            added = ?change.added,
            "Rewrote configuration"
        );
        Ok(Some(change))
    }

    /// Apply `step` to every configuration in parallel
    ///
    /// # Errors
    /// The first resolution error; configurations already rewritten keep
    /// their new features until reset
    pub fn apply_all(&self, step: &dyn RepeatAction, configs: &mut [Configuration]) -> Result<Vec<ConfigChange>> {
        let changes: Vec<Option<ConfigChange>> = configs
            .par_iter_mut()
            .map(|config| self.apply(step, config))
            .collect::<Result<_>>()?;
        Ok(changes.into_iter().flatten().collect())
    }

    /// Rename table for `step`, if its generation has one
    #[must_use]
    pub fn table_for(&self, step: &dyn RepeatAction) -> Option<&'a RenameTable> {
        step.spec_version()
            .and_then(|version| self.context.rules().for_version(version))
    }

    /// Rewrite one text artifact for `step`
    ///
    /// Text is returned unchanged when the step has no rename table.
    #[must_use]
    pub fn rewrite_text(&self, step: &dyn RepeatAction, text: &str) -> String {
        match self.table_for(step) {
            Some(table) => self.matcher.rewrite(text, table),
            None => text.to_string(),
        }
    }

    /// Rewrite several text artifacts in parallel, keeping their order
    #[must_use]
    pub fn rewrite_texts<S>(&self, step: &dyn RepeatAction, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.rewrite_text(step, text.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featshift_ident::FeaturePattern;
    use featshift_plan::{ConfigTargets, EmptyAction, FeatureReplacementAction, EE9_FEATURES};
    use pretty_assertions::assert_eq;

    fn id(name: &str) -> FeatureId {
        FeatureId::new(name).unwrap()
    }

    fn servlet_upgrade() -> FeatureReplacementAction {
        FeatureReplacementAction::new()
            .remove_feature(FeaturePattern::parse("servlet-4.0").unwrap())
            .add_feature(id("servlet-5.0"))
            .force_add_features(false)
    }

    #[test]
    fn apply_reports_change() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let mut config = Configuration::parse("server", ["servlet-4.0", "cdi-2.0"]).unwrap();

        let change = rewriter.apply(&servlet_upgrade(), &mut config).unwrap().unwrap();
        assert_eq!(change.removed, [id("servlet-4.0")]);
        assert_eq!(change.added, [id("servlet-5.0")]);
    }

    #[test]
    fn empty_action_leaves_config() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let mut config = Configuration::parse("server", ["servlet-4.0"]).unwrap();

        assert!(rewriter.apply(&EmptyAction::new(), &mut config).unwrap().is_none());
        assert!(!config.is_modified());
    }

    #[test]
    fn untargeted_config_left_alone() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let step = servlet_upgrade().for_configs(ConfigTargets::named(["other"]));
        let mut config = Configuration::parse("server", ["servlet-4.0"]).unwrap();

        assert!(rewriter.apply(&step, &mut config).unwrap().is_none());
        assert!(!config.is_modified());
    }

    #[test]
    fn invalid_removal_surfaces() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let step = FeatureReplacementAction::new().remove_feature(FeaturePattern::parse("componenttest").unwrap());
        let mut config = Configuration::parse("server", ["componenttest-1.0"]).unwrap();

        assert!(rewriter.apply(&step, &mut config).is_err());
        assert!(!config.is_modified());
    }

    #[test]
    fn apply_all_rewrites_each_config() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let mut configs = vec![
            Configuration::parse("a", ["servlet-4.0"]).unwrap(),
            Configuration::parse("b", ["cdi-2.0"]).unwrap(),
            Configuration::parse("c", ["servlet-4.0", "jsonp-1.1"]).unwrap(),
        ];

        let changes = rewriter.apply_all(&servlet_upgrade(), &mut configs).unwrap();
        let changed: Vec<_> = changes.iter().filter(|c| !c.is_empty()).map(|c| c.name.as_str()).collect();
        assert_eq!(changed, ["a", "c"]);
        assert!(configs[0].features().contains(&id("servlet-5.0")));
        assert!(!configs[1].is_modified());
    }

    #[test]
    fn text_rewritten_with_step_table() {
        let context = MigrationContext::builtin();
        let rewriter = ConfigRewriter::new(&context);
        let ee9 = FeatureReplacementAction::for_feature_set(
            context.catalog(),
            context.catalog().require(EE9_FEATURES).unwrap(),
            ConfigTargets::All,
            featshift_plan::TestMode::Lite,
        );

        assert_eq!(
            rewriter.rewrite_text(&ee9, "throw new javax.servlet.ServletException();"),
            "throw new jakarta.servlet.ServletException();"
        );
        assert_eq!(rewriter.rewrite_text(&EmptyAction::new(), "javax.servlet.X"), "javax.servlet.X");

        let texts = ["javax.el.ELException", "javax.annotation.processing.Processor"];
        assert_eq!(
            rewriter.rewrite_texts(&ee9, &texts),
            ["jakarta.el.ELException", "javax.annotation.processing.Processor"]
        );
    }
}
