//! Immutable feature sets
//!
//! A [`FeatureSet`] groups the features of one specification generation
//! under a globally unique id. Sets are built once; a modified copy is
//! produced through [`FeatureSet::to_builder`].

use featshift_ident::{FeatureId, RuntimeVersion, SpecVersion};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Named, versioned group of features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    id: String,
    #[serde(default)]
    spec_version: Option<SpecVersion>,
    #[serde(default)]
    min_runtime_version: RuntimeVersion,
    #[serde(default)]
    features: IndexSet<FeatureId>,
}

impl FeatureSet {
    /// Start building a set with `id`
    #[inline]
    #[must_use]
    pub fn builder(id: impl Into<String>) -> FeatureSetBuilder {
        FeatureSetBuilder::new(id)
    }

    /// Builder pre-filled with this set's contents
    #[must_use]
    pub fn to_builder(&self) -> FeatureSetBuilder {
        FeatureSetBuilder {
            id: self.id.clone(),
            spec_version: self.spec_version,
            min_runtime_version: self.min_runtime_version,
            features: self.features.clone(),
        }
    }

    /// Globally unique id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Specification generation, `None` for sets outside the EE line
    #[inline]
    #[must_use]
    pub fn spec_version(&self) -> Option<SpecVersion> {
        self.spec_version
    }

    /// Lowest runtime this set can run on
    #[inline]
    #[must_use]
    pub fn min_runtime_version(&self) -> RuntimeVersion {
        self.min_runtime_version
    }

    /// Features in declared order
    #[inline]
    #[must_use]
    pub fn features(&self) -> &IndexSet<FeatureId> {
        &self.features
    }

    /// Check if the set contains `feature`
    #[inline]
    #[must_use]
    pub fn contains(&self, feature: &FeatureId) -> bool {
        self.features.contains(feature)
    }

    /// Check if `runtime` is recent enough for this set
    #[inline]
    #[must_use]
    pub fn runs_on(&self, runtime: RuntimeVersion) -> bool {
        runtime.satisfies(self.min_runtime_version)
    }
}

/// Builder for [`FeatureSet`]
#[derive(Debug, Clone)]
pub struct FeatureSetBuilder {
    id: String,
    spec_version: Option<SpecVersion>,
    min_runtime_version: RuntimeVersion,
    features: IndexSet<FeatureId>,
}

impl FeatureSetBuilder {
    /// Create builder for `id`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            spec_version: None,
            min_runtime_version: RuntimeVersion::default(),
            features: IndexSet::new(),
        }
    }

    /// Replace the id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set specification generation
    #[inline]
    #[must_use]
    pub fn with_spec_version(mut self, version: SpecVersion) -> Self {
        self.spec_version = Some(version);
        self
    }

    /// Set minimum runtime
    #[inline]
    #[must_use]
    pub fn with_min_runtime_version(mut self, version: impl Into<RuntimeVersion>) -> Self {
        self.min_runtime_version = version.into();
        self
    }

    /// Add feature
    #[inline]
    #[must_use]
    pub fn add_feature(mut self, feature: FeatureId) -> Self {
        self.features.insert(feature);
        self
    }

    /// Add features
    #[must_use]
    pub fn add_features(mut self, features: impl IntoIterator<Item = FeatureId>) -> Self {
        self.features.extend(features);
        self
    }

    /// Remove feature
    #[inline]
    #[must_use]
    pub fn remove_feature(mut self, feature: &FeatureId) -> Self {
        self.features.shift_remove(feature);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> FeatureSet {
        FeatureSet {
            id: self.id,
            spec_version: self.spec_version,
            min_runtime_version: self.min_runtime_version,
            features: self.features,
        }
    }
}
