//! Error types for featshift Core
//!
//! Provides [`CoreError`], which wraps the errors of every lower layer plus
//! settings failures, so callers of the orchestrator handle one type.

use featshift_ident::IdentError;
use featshift_plan::PlanError;
use featshift_rename::RenameError;
use featshift_resolve::ResolveError;
use std::path::{Path, PathBuf};

/// Main featshift error type
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Settings file could not be read
    #[error("failed to read settings {path}: {source}")]
    SettingsIo {
        /// Settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Settings are not valid TOML or have the wrong shape
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Rule table failed to load in strict mode
    #[error("rename error: {0}")]
    Rename(#[from] RenameError),

    /// Feature resolution rejected the request
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Catalog or plan error
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    /// Identifier could not be parsed
    #[error("identifier error: {0}")]
    Ident(#[from] IdentError),
}

impl CoreError {
    /// Create settings I/O error
    pub fn settings_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::SettingsIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Check if the error happened while loading files
    #[inline]
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        match self {
            Self::SettingsIo { .. } | Self::Settings(_) | Self::Rename(_) => true,
            Self::Plan(err) => err.is_load_error(),
            Self::Resolve(_) | Self::Ident(_) => false,
        }
    }
}

/// Result alias for featshift Core
pub type Result<T> = std::result::Result<T, CoreError>;
