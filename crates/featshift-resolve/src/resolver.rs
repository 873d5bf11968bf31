//! Feature-set resolution
//!
//! Provides [`FeatureResolver`], which turns a current feature set and a
//! [`FeatureChanges`] request into the resulting feature set.
//!
//! # Modes
//!
//! - Forced: remove everything matched, then add every candidate
//! - Smart: add a replacement only for removal entries that matched
//!
//! In both modes `always_add` is unioned last.

use crate::changes::FeatureChanges;
use crate::error::ResolveError;
use crate::renames::BaseNameRenames;
use featshift_ident::{FeatureId, FeaturePattern};
use indexmap::IndexSet;

/// Applies feature changes using a base-name rename table
#[derive(Debug, Clone, Copy)]
pub struct FeatureResolver<'a> {
    renames: &'a BaseNameRenames,
}

impl<'a> FeatureResolver<'a> {
    /// Create resolver over a rename table
    #[inline]
    #[must_use]
    pub fn new(renames: &'a BaseNameRenames) -> Self {
        Self { renames }
    }

    /// Compute the feature set that results from `changes`
    ///
    /// # Errors
    /// `ResolveError::InvalidIdentifier` if a removal entry is versionless;
    /// `current` is never inspected in that case
    pub fn resolve(
        &self,
        current: &IndexSet<FeatureId>,
        changes: &FeatureChanges,
    ) -> Result<IndexSet<FeatureId>, ResolveError> {
        let mut features = current.clone();
        self.resolve_in_place(&mut features, changes)?;
        Ok(features)
    }

    /// Apply `changes` to `features` directly
    ///
    /// # Errors
    /// `ResolveError::InvalidIdentifier` before any mutation if a removal
    /// entry is versionless
    pub fn resolve_in_place(
        &self,
        features: &mut IndexSet<FeatureId>,
        changes: &FeatureChanges,
    ) -> Result<(), ResolveError> {
        if let Some(invalid) = changes.first_invalid_removal() {
            return Err(ResolveError::invalid_identifier(invalid.to_string()));
        }

        if changes.is_forced() {
            features.retain(|feature| !changes.remove.iter().any(|pattern| pattern.matches(feature)));
            features.extend(changes.add.iter().cloned());
        } else {
            for pattern in &changes.remove {
                if !remove_matching(features, pattern) {
                    continue;
                }
                match self.replacement_for(pattern, &changes.add, &changes.always_add) {
                    Some(replacement) => {
                        tracing::debug!(removed = %pattern, added = %replacement, "Replaced feature");
                        features.insert(replacement.clone());
                    }
                    None => tracing::debug!(removed = %pattern, "Removed feature without replacement"),
                }
            }
        }

        features.extend(changes.always_add.iter().cloned());
        Ok(())
    }

    /// Find the feature that replaces `removed`
    ///
    /// The last candidate sharing the removed base name wins, and a match in
    /// `always_add` beats any match in `candidates`. When nothing matches,
    /// the base name is translated once through the rename table.
    #[must_use]
    pub fn replacement_for<'c>(
        &self,
        removed: &FeaturePattern,
        candidates: &'c IndexSet<FeatureId>,
        always_add: &'c IndexSet<FeatureId>,
    ) -> Option<&'c FeatureId> {
        let base = removed.base_name()?;
        Self::with_base(base, candidates, always_add).or_else(|| {
            let renamed = self.renames.translate(base)?;
            Self::with_base(renamed, candidates, always_add)
        })
    }

    fn with_base<'c>(
        base: &str,
        candidates: &'c IndexSet<FeatureId>,
        always_add: &'c IndexSet<FeatureId>,
    ) -> Option<&'c FeatureId> {
        last_with_base(always_add, base).or_else(|| last_with_base(candidates, base))
    }
}

fn last_with_base<'c>(features: &'c IndexSet<FeatureId>, base: &str) -> Option<&'c FeatureId> {
    features.iter().rev().find(|feature| feature.has_base_name(base))
}

/// Remove every feature matched by `pattern`, reporting whether any was
fn remove_matching(features: &mut IndexSet<FeatureId>, pattern: &FeaturePattern) -> bool {
    match pattern {
        FeaturePattern::Exact(id) => features.shift_remove(id),
        FeaturePattern::Prefix(_) => {
            let before = features.len();
            features.retain(|feature| !pattern.matches(feature));
            features.len() != before
        }
    }
}
