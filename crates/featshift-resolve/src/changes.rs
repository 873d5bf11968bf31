//! Requested feature changes
//!
//! Provides [`FeatureChanges`], the remove / add / always-add request handed
//! to the resolver. All three sets preserve insertion order, which decides
//! the winner when several candidates share a base name.

use crate::error::ResolveError;
use featshift_ident::{FeatureId, FeaturePattern};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// How removals and additions interact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementMode {
    /// Remove what matches, then add every requested feature
    Forced,

    /// Add a replacement only for features that were actually removed
    #[default]
    Smart,
}

/// Parse feature names into an ordered set
///
/// # Errors
/// `ResolveError::Ident` for the first name that is not a valid feature
pub fn feature_set<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<IndexSet<FeatureId>, ResolveError> {
    names
        .into_iter()
        .map(|name| FeatureId::new(name).map_err(ResolveError::from))
        .collect()
}

/// Remove / add / always-add request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureChanges {
    /// Features (or wildcard prefixes) to remove
    pub remove: IndexSet<FeaturePattern>,
    /// Replacement candidates
    pub add: IndexSet<FeatureId>,
    /// Features added unconditionally
    pub always_add: IndexSet<FeatureId>,
    /// Forced or smart replacement
    pub mode: ReplacementMode,
}

impl FeatureChanges {
    /// Create empty request
    #[inline]
    #[must_use]
    pub fn new(mode: ReplacementMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Build request from raw names
    ///
    /// # Errors
    /// `ResolveError::Ident` if any name fails to parse
    pub fn parse<'a>(
        remove: impl IntoIterator<Item = &'a str>,
        add: impl IntoIterator<Item = &'a str>,
        always_add: impl IntoIterator<Item = &'a str>,
        mode: ReplacementMode,
    ) -> Result<Self, ResolveError> {
        let remove = remove
            .into_iter()
            .map(|raw| FeaturePattern::parse(raw).map_err(ResolveError::from))
            .collect::<Result<_, _>>()?;

        Ok(Self {
            remove,
            add: feature_set(add)?,
            always_add: feature_set(always_add)?,
            mode,
        })
    }

    /// Add removal entry
    #[inline]
    #[must_use]
    pub fn with_remove(mut self, pattern: FeaturePattern) -> Self {
        self.remove.insert(pattern);
        self
    }

    /// Add replacement candidate
    #[inline]
    #[must_use]
    pub fn with_add(mut self, feature: FeatureId) -> Self {
        self.add.insert(feature);
        self
    }

    /// Add unconditional feature
    #[inline]
    #[must_use]
    pub fn with_always_add(mut self, feature: FeatureId) -> Self {
        self.always_add.insert(feature);
        self
    }

    /// Check if the request is forced
    #[inline]
    #[must_use]
    pub fn is_forced(&self) -> bool {
        self.mode == ReplacementMode::Forced
    }

    /// Check if the request changes nothing
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.add.is_empty() && self.always_add.is_empty()
    }

    /// First removal entry that cannot be resolved
    #[must_use]
    pub fn first_invalid_removal(&self) -> Option<&FeaturePattern> {
        self.remove.iter().find(|pattern| !pattern.is_removable())
    }
}
