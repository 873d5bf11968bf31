//! Repeat actions
//!
//! A repeat action describes one pass over the test corpus: which feature
//! changes to apply, to which configurations, and under which environment the
//! pass is enabled.
//!
//! # Actions
//!
//! - [`EmptyAction`]: run with configurations as declared
//! - [`FeatureReplacementAction`]: swap features before running

use crate::catalog::FeatureCatalog;
use crate::feature_set::FeatureSet;
use crate::mode::{RunEnvironment, SkipReason, TestMode};
use featshift_ident::{FeatureId, FeaturePattern, RuntimeVersion, SpecVersion};
use featshift_resolve::{FeatureChanges, ReplacementMode};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Id of the pass that leaves configurations untouched
pub const NO_MODIFICATION_ACTION: &str = "NO_MODIFICATION_ACTION";

/// Id of a replacement that adds nothing and has no explicit id
pub const DEFAULT_REPLACEMENT_ID: &str = "FEATURE_REPLACEMENT";

/// Configurations a step applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigTargets {
    /// Every configuration
    #[default]
    All,
    /// Only configurations with these names
    Named(IndexSet<String>),
}

impl ConfigTargets {
    /// Target the named configurations only
    #[must_use]
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Named(names.into_iter().map(Into::into).collect())
    }

    /// Check if the configuration called `name` is targeted
    #[inline]
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(names) => names.contains(name),
        }
    }
}

/// One pass over the test corpus
pub trait RepeatAction: Debug + Send + Sync {
    /// Unique id of the pass
    fn id(&self) -> &str;

    /// Lowest test mode in which the pass runs
    fn test_mode(&self) -> TestMode;

    /// Why the pass would be skipped in `env`, if it would be
    fn skip_reason(&self, env: &RunEnvironment) -> Option<SkipReason> {
        env.check(self.test_mode(), None)
    }

    /// Check if the pass runs in `env`
    fn is_enabled(&self, env: &RunEnvironment) -> bool {
        self.skip_reason(env).is_none()
    }

    /// Generation whose rename table applies to text artifacts
    fn spec_version(&self) -> Option<SpecVersion> {
        None
    }

    /// Feature changes to apply, `None` to leave configurations as declared
    fn changes(&self) -> Option<&FeatureChanges> {
        None
    }

    /// Configurations the changes apply to
    fn targets(&self) -> &ConfigTargets;
}

/// Pass that runs every configuration unmodified
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyAction {
    test_mode: TestMode,
    targets: ConfigTargets,
}

impl EmptyAction {
    /// Create action running in every mode
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set required test mode
    #[inline]
    #[must_use]
    pub fn with_test_mode(mut self, test_mode: TestMode) -> Self {
        self.test_mode = test_mode;
        self
    }
}

impl RepeatAction for EmptyAction {
    fn id(&self) -> &str {
        NO_MODIFICATION_ACTION
    }

    fn test_mode(&self) -> TestMode {
        self.test_mode
    }

    fn targets(&self) -> &ConfigTargets {
        &self.targets
    }
}

/// Pass that swaps features in the targeted configurations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReplacementAction {
    id: String,
    #[serde(skip, default = "keeps_id")]
    explicit_id: bool,
    changes: FeatureChanges,
    targets: ConfigTargets,
    test_mode: TestMode,
    min_runtime_version: Option<RuntimeVersion>,
    spec_version: Option<SpecVersion>,
}

/// A deserialized action keeps the id it was stored with
const fn keeps_id() -> bool {
    true
}

impl Default for FeatureReplacementAction {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureReplacementAction {
    /// Create empty forced replacement targeting every configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: DEFAULT_REPLACEMENT_ID.to_string(),
            explicit_id: false,
            changes: FeatureChanges::new(ReplacementMode::Forced),
            targets: ConfigTargets::All,
            test_mode: TestMode::Lite,
            min_runtime_version: None,
            spec_version: None,
        }
    }

    /// Self-contained action moving configurations onto `set`
    ///
    /// Removes every feature of every other set in `all` and adds the
    /// features of `set`. Removed features are replaced only when a
    /// matching feature exists in `set`.
    #[must_use]
    pub fn for_feature_set(all: &FeatureCatalog, set: &FeatureSet, targets: ConfigTargets, mode: TestMode) -> Self {
        let mut action = Self::new()
            .with_id(set.id())
            .remove_features(all.features_except(set.id()).into_iter().map(FeaturePattern::Exact))
            .add_features(set.features().iter().cloned())
            .force_add_features(false)
            .for_configs(targets)
            .with_test_mode(mode)
            .with_min_runtime_version(set.min_runtime_version());
        action.spec_version = set.spec_version();
        action
    }

    /// Add replacement candidate
    #[inline]
    #[must_use]
    pub fn add_feature(mut self, feature: FeatureId) -> Self {
        self.changes.add.insert(feature);
        self.refresh_id();
        self
    }

    /// Add replacement candidates
    #[must_use]
    pub fn add_features(mut self, features: impl IntoIterator<Item = FeatureId>) -> Self {
        self.changes.add.extend(features);
        self.refresh_id();
        self
    }

    /// Remove a feature, or every feature matching a wildcard
    #[inline]
    #[must_use]
    pub fn remove_feature(mut self, pattern: FeaturePattern) -> Self {
        self.changes.remove.insert(pattern);
        self
    }

    /// Remove several features
    #[must_use]
    pub fn remove_features(mut self, patterns: impl IntoIterator<Item = FeaturePattern>) -> Self {
        self.changes.remove.extend(patterns);
        self
    }

    /// Add a feature whether or not anything was removed
    #[inline]
    #[must_use]
    pub fn always_add_feature(mut self, feature: FeatureId) -> Self {
        self.changes.always_add.insert(feature);
        self
    }

    /// Choose forced (`true`) or smart (`false`) replacement
    #[inline]
    #[must_use]
    pub fn force_add_features(mut self, force: bool) -> Self {
        self.changes.mode = if force {
            ReplacementMode::Forced
        } else {
            ReplacementMode::Smart
        };
        self
    }

    /// Restrict the action to some configurations
    #[inline]
    #[must_use]
    pub fn for_configs(mut self, targets: ConfigTargets) -> Self {
        self.targets = targets;
        self
    }

    /// Set explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self.explicit_id = true;
        self
    }

    /// Set required test mode
    #[inline]
    #[must_use]
    pub fn with_test_mode(mut self, test_mode: TestMode) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Run only in full mode and above
    #[inline]
    #[must_use]
    pub fn full_mode_only(self) -> Self {
        self.with_test_mode(TestMode::Full)
    }

    /// Run in every mode
    #[inline]
    #[must_use]
    pub fn lite_mode_only(self) -> Self {
        self.with_test_mode(TestMode::Lite)
    }

    /// Require a minimum runtime
    #[inline]
    #[must_use]
    pub fn with_min_runtime_version(mut self, version: impl Into<RuntimeVersion>) -> Self {
        self.min_runtime_version = Some(version.into());
        self
    }

    /// Select the rename table for text artifacts
    #[inline]
    #[must_use]
    pub fn with_spec_version(mut self, version: SpecVersion) -> Self {
        self.spec_version = Some(version);
        self
    }

    /// Minimum runtime, if any
    #[inline]
    #[must_use]
    pub fn min_runtime_version(&self) -> Option<RuntimeVersion> {
        self.min_runtime_version
    }

    /// Derive the id from the sorted additions unless one was set
    fn refresh_id(&mut self) {
        if self.explicit_id {
            return;
        }
        let mut added: Vec<&str> = self.changes.add.iter().map(FeatureId::as_str).collect();
        added.sort_unstable();
        self.id = if added.is_empty() {
            DEFAULT_REPLACEMENT_ID.to_string()
        } else {
            added.join("_")
        };
    }
}

impl RepeatAction for FeatureReplacementAction {
    /// Explicit id, or the sorted added features joined by `_`
    fn id(&self) -> &str {
        &self.id
    }

    fn test_mode(&self) -> TestMode {
        self.test_mode
    }

    fn skip_reason(&self, env: &RunEnvironment) -> Option<SkipReason> {
        env.check(self.test_mode, self.min_runtime_version)
    }

    fn spec_version(&self) -> Option<SpecVersion> {
        self.spec_version
    }

    fn changes(&self) -> Option<&FeatureChanges> {
        Some(&self.changes)
    }

    fn targets(&self) -> &ConfigTargets {
        &self.targets
    }
}
