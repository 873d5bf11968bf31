//! Error types for feature resolution
//!
//! A missing replacement is not an error: the feature is removed and nothing
//! takes its place. Only caller contract violations surface here.

use featshift_ident::IdentError;

/// Errors during feature resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Removal entry has no `-` and no wildcard suffix
    #[error("invalid identifier for removal: '{identifier}' has no '-' and no wildcard suffix")]
    InvalidIdentifier {
        /// The rejected removal entry
        identifier: String,
    },

    /// Feature name could not be parsed
    #[error("identifier error: {0}")]
    Ident(#[from] IdentError),
}

impl ResolveError {
    /// Create invalid identifier error
    pub fn invalid_identifier(identifier: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
        }
    }
}
