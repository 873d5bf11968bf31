//! Test modes and the run environment
//!
//! Provides [`TestMode`], [`RunEnvironment`] and [`SkipReason`]. The
//! environment is the only input to enablement checks.

use crate::error::PlanError;
use featshift_ident::RuntimeVersion;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// How thorough a run is, ordered from cheapest to most exhaustive
///
/// A step runs iff the environment's mode is at least the step's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestMode {
    /// Quick subset, always run
    #[default]
    Lite,
    /// Full regression run
    Full,
    /// Tests known to be unstable
    Quarantine,
    /// Experimental tests
    Experimental,
}

impl TestMode {
    /// Upper-case name, e.g. `FULL`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lite => "LITE",
            Self::Full => "FULL",
            Self::Quarantine => "QUARANTINE",
            Self::Experimental => "EXPERIMENTAL",
        }
    }

    /// Check if a step requiring `required` runs in this mode
    #[inline]
    #[must_use]
    pub fn allows(self, required: TestMode) -> bool {
        self >= required
    }
}

impl Display for TestMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestMode {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lite" => Ok(Self::Lite),
            "full" => Ok(Self::Full),
            "quarantine" => Ok(Self::Quarantine),
            "experimental" => Ok(Self::Experimental),
            _ => Err(PlanError::UnknownTestMode { name: s.to_string() }),
        }
    }
}

/// Runtime level and test mode of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunEnvironment {
    /// Runtime the tests execute on
    pub runtime_version: RuntimeVersion,
    /// Selected test mode
    pub test_mode: TestMode,
}

impl RunEnvironment {
    /// Create environment
    #[inline]
    #[must_use]
    pub fn new(runtime_version: impl Into<RuntimeVersion>, test_mode: TestMode) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            test_mode,
        }
    }

    /// Set runtime version
    #[inline]
    #[must_use]
    pub fn with_runtime_version(mut self, runtime_version: impl Into<RuntimeVersion>) -> Self {
        self.runtime_version = runtime_version.into();
        self
    }

    /// Set test mode
    #[inline]
    #[must_use]
    pub fn with_test_mode(mut self, test_mode: TestMode) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Why a step with these requirements would not run, if it would not
    #[must_use]
    pub fn check(&self, mode: TestMode, min_runtime: Option<RuntimeVersion>) -> Option<SkipReason> {
        if !self.test_mode.allows(mode) {
            return Some(SkipReason::TestMode {
                required: mode,
                active: self.test_mode,
            });
        }
        match min_runtime {
            Some(required) if !self.runtime_version.satisfies(required) => Some(SkipReason::RuntimeTooOld {
                required,
                actual: self.runtime_version,
            }),
            _ => None,
        }
    }
}

/// Why a step was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Environment mode is below the step's mode
    TestMode {
        /// Mode the step needs
        required: TestMode,
        /// Mode of the run
        active: TestMode,
    },
    /// Runtime is older than the step's minimum
    RuntimeTooOld {
        /// Minimum runtime of the step
        required: RuntimeVersion,
        /// Runtime of the run
        actual: RuntimeVersion,
    },
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestMode { required, active } => {
                write!(f, "requires test mode {required}, running {active}")
            }
            Self::RuntimeTooOld { required, actual } => {
                write!(f, "requires runtime {required}, running {actual}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_ordering() {
        assert!(TestMode::Lite < TestMode::Full);
        assert!(TestMode::Full < TestMode::Quarantine);
        assert!(TestMode::Quarantine < TestMode::Experimental);
        assert!(TestMode::Full.allows(TestMode::Lite));
        assert!(!TestMode::Lite.allows(TestMode::Full));
    }

    #[test]
    fn mode_parse() {
        assert_eq!("FULL".parse::<TestMode>().unwrap(), TestMode::Full);
        assert_eq!(" lite ".parse::<TestMode>().unwrap(), TestMode::Lite);
        assert!("nightly".parse::<TestMode>().is_err());
        assert!("".parse::<TestMode>().is_err());
    }

    #[test]
    fn check_reports_mode_before_runtime() {
        let env = RunEnvironment::new(8, TestMode::Lite);
        assert_eq!(
            env.check(TestMode::Full, Some(RuntimeVersion::new(17))),
            Some(SkipReason::TestMode {
                required: TestMode::Full,
                active: TestMode::Lite
            })
        );
        assert_eq!(
            env.check(TestMode::Lite, Some(RuntimeVersion::new(11))),
            Some(SkipReason::RuntimeTooOld {
                required: RuntimeVersion::new(11),
                actual: RuntimeVersion::new(8)
            })
        );
        assert_eq!(env.check(TestMode::Lite, None), None);
    }

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::RuntimeTooOld {
            required: RuntimeVersion::new(17),
            actual: RuntimeVersion::new(11),
        };
        assert_eq!(reason.to_string(), "requires runtime 17, running 11");
    }
}
