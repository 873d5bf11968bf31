//! Error types for catalogs and execution plans
//!
//! Provides error handling for:
//! - Catalog loading (I/O, TOML syntax, duplicate ids)
//! - Lookups of unknown feature sets
//! - Plans with duplicate step ids

use featshift_ident::IdentError;
use featshift_resolve::ResolveError;
use std::path::{Path, PathBuf};

/// Errors while building catalogs and plans
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Catalog file could not be read
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML or has the wrong shape
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// Two feature sets share an id
    #[error("duplicate feature set id: {id}")]
    DuplicateFeatureSet {
        /// The repeated id
        id: String,
    },

    /// No feature set with this id
    #[error("unknown feature set: {id}")]
    UnknownFeatureSet {
        /// The requested id
        id: String,
    },

    /// Two plan steps share an id
    #[error("duplicate repeat step id: {id}")]
    DuplicateStep {
        /// The repeated id
        id: String,
    },

    /// Test mode name not recognized
    #[error("unknown test mode: '{name}'")]
    UnknownTestMode {
        /// The rejected name
        name: String,
    },

    /// Feature change could not be built
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Identifier could not be parsed
    #[error("identifier error: {0}")]
    Ident(#[from] IdentError),
}

impl PlanError {
    /// Create I/O error for `path`
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create unknown feature set error
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::UnknownFeatureSet { id: id.into() }
    }

    /// Check if this is a load failure (I/O or syntax)
    #[inline]
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_display() {
        assert_eq!(PlanError::unknown("EE12_FEATURES").to_string(), "unknown feature set: EE12_FEATURES");
    }

    #[test]
    fn load_error_classification() {
        let io = PlanError::io_error("catalog.toml", std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_load_error());
        assert!(io.to_string().contains("catalog.toml"));
        assert!(!PlanError::DuplicateStep { id: "x".into() }.is_load_error());
    }
}
