//! Run settings
//!
//! [`Settings`] is read from TOML. Every field has a default, so an empty
//! file is valid:
//!
//! ```toml
//! runtime_version = 11
//! test_mode = "full"
//! catalog = "catalog.toml"
//! strict_rules = false
//!
//! [[rules]]
//! spec_version = "EE9"
//! path = "jakarta-renames.properties"
//! ```

use crate::error::{CoreError, Result};
use featshift_ident::{RuntimeVersion, SpecVersion};
use featshift_plan::{RunEnvironment, TestMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime assumed when none is configured
pub const DEFAULT_RUNTIME_VERSION: RuntimeVersion = RuntimeVersion::new(17);

/// Rule file registered for a specification generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSource {
    /// First generation the table applies to
    pub spec_version: SpecVersion,
    /// Properties file with `old=new` lines
    pub path: PathBuf,
}

/// Settings for a featshift run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Runtime the tests execute on
    pub runtime_version: RuntimeVersion,
    /// Selected test mode
    pub test_mode: TestMode,
    /// Catalog file; the built-in catalog is used when unset
    pub catalog: Option<PathBuf>,
    /// Fail on unreadable rule files instead of using an empty table
    pub strict_rules: bool,
    /// Extra rule files
    pub rules: Vec<RuleSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            runtime_version: DEFAULT_RUNTIME_VERSION,
            test_mode: TestMode::Lite,
            catalog: None,
            strict_rules: false,
            rules: Vec::new(),
        }
    }
}

impl Settings {
    /// Create default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML settings
    ///
    /// # Errors
    /// `CoreError::Settings` for invalid TOML or unknown values
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load TOML settings file
    ///
    /// # Errors
    /// `CoreError::SettingsIo` if the file cannot be read, otherwise as
    /// [`Settings::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::settings_io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Set runtime version
    #[inline]
    #[must_use]
    pub fn with_runtime_version(mut self, version: impl Into<RuntimeVersion>) -> Self {
        self.runtime_version = version.into();
        self
    }

    /// Set test mode
    #[inline]
    #[must_use]
    pub fn with_test_mode(mut self, mode: TestMode) -> Self {
        self.test_mode = mode;
        self
    }

    /// Set catalog file
    #[inline]
    #[must_use]
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// Enable or disable strict rule loading
    #[inline]
    #[must_use]
    pub fn with_strict_rules(mut self, strict: bool) -> Self {
        self.strict_rules = strict;
        self
    }

    /// Add rule file
    #[must_use]
    pub fn with_rules(mut self, spec_version: SpecVersion, path: impl Into<PathBuf>) -> Self {
        self.rules.push(RuleSource {
            spec_version,
            path: path.into(),
        });
        self
    }

    /// Environment used for enablement checks
    #[inline]
    #[must_use]
    pub fn environment(&self) -> RunEnvironment {
        RunEnvironment::new(self.runtime_version, self.test_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_text_gives_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn full_settings() {
        let settings = Settings::from_toml_str(
            r#"
            runtime_version = 11
            test_mode = "full"
            catalog = "catalog.toml"
            strict_rules = true

            [[rules]]
            spec_version = "EE10"
            path = "ee10.properties"
            "#,
        )
        .unwrap();

        let expected = Settings::new()
            .with_runtime_version(11)
            .with_test_mode(TestMode::Full)
            .with_catalog("catalog.toml")
            .with_strict_rules(true)
            .with_rules(SpecVersion::Ee10, "ee10.properties");
        assert_eq!(settings, expected);
        assert_eq!(settings.environment(), RunEnvironment::new(11, TestMode::Full));
    }

    #[test]
    fn unknown_mode_rejected() {
        assert!(matches!(
            Settings::from_toml_str("test_mode = \"nightly\""),
            Err(CoreError::Settings(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("featshift.toml")).unwrap_err();
        assert!(matches!(err, CoreError::SettingsIo { .. }));
    }
}
