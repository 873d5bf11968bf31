//! Server configurations under test

use featshift_ident::FeatureId;
use featshift_resolve::{feature_set, ResolveError};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Named configuration with its declared and current features
///
/// Owned by one pass at a time, transformed in place and reset before the
/// next pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    name: String,
    original: IndexSet<FeatureId>,
    features: IndexSet<FeatureId>,
}

impl Configuration {
    /// Create configuration with its declared features
    #[must_use]
    pub fn new(name: impl Into<String>, features: IndexSet<FeatureId>) -> Self {
        Self {
            name: name.into(),
            original: features.clone(),
            features,
        }
    }

    /// Create configuration from raw feature names
    ///
    /// # Errors
    /// `ResolveError::Ident` for an invalid name
    pub fn parse<'a>(name: impl Into<String>, features: impl IntoIterator<Item = &'a str>) -> Result<Self, ResolveError> {
        Ok(Self::new(name, feature_set(features)?))
    }

    /// Configuration name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current features
    #[inline]
    #[must_use]
    pub fn features(&self) -> &IndexSet<FeatureId> {
        &self.features
    }

    /// Current features, for in-place resolution
    #[inline]
    pub fn features_mut(&mut self) -> &mut IndexSet<FeatureId> {
        &mut self.features
    }

    /// Features as declared
    #[inline]
    #[must_use]
    pub fn original(&self) -> &IndexSet<FeatureId> {
        &self.original
    }

    /// Check if the current features differ from the declared ones
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.features != self.original
    }

    /// Restore the declared features
    pub fn reset(&mut self) {
        self.features.clone_from(&self.original);
    }
}
