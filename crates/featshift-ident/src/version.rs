//! Specification and runtime versions
//!
//! Provides [`SpecVersion`] for tagging feature sets with the platform
//! generation they implement and [`RuntimeVersion`] for the minimum runtime
//! level a feature set needs.

use crate::error::IdentError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Platform specification generation
///
/// Ordered oldest to newest. From [`SpecVersion::Ee9`] on, the platform lives
/// in the `jakarta` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpecVersion {
    /// Java EE 6
    Ee6,
    /// Java EE 7
    Ee7,
    /// Java EE 8
    Ee8,
    /// Jakarta EE 9
    Ee9,
    /// Jakarta EE 10
    Ee10,
    /// Jakarta EE 11
    Ee11,
}

impl SpecVersion {
    /// All versions, oldest first
    pub const ALL: [SpecVersion; 6] = [
        Self::Ee6,
        Self::Ee7,
        Self::Ee8,
        Self::Ee9,
        Self::Ee10,
        Self::Ee11,
    ];

    /// Short tag, e.g. `EE9`
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ee6 => "EE6",
            Self::Ee7 => "EE7",
            Self::Ee8 => "EE8",
            Self::Ee9 => "EE9",
            Self::Ee10 => "EE10",
            Self::Ee11 => "EE11",
        }
    }
}

impl Display for SpecVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SpecVersion {
    type Err = IdentError;

    /// Accepts `EE9`, `ee9` and `9`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("ee") => &trimmed[2..],
            _ => trimmed,
        };

        match digits {
            "6" => Ok(Self::Ee6),
            "7" => Ok(Self::Ee7),
            "8" => Ok(Self::Ee8),
            "9" => Ok(Self::Ee9),
            "10" => Ok(Self::Ee10),
            "11" => Ok(Self::Ee11),
            _ => Err(IdentError::UnknownSpecVersion(s.to_string())),
        }
    }
}

impl TryFrom<String> for SpecVersion {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpecVersion> for String {
    fn from(version: SpecVersion) -> Self {
        version.tag().to_string()
    }
}

/// Ordinal runtime level
///
/// Compared numerically. Parsed from `17`, `17.0.2` or the legacy `1.8` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeVersion(pub u32);

impl RuntimeVersion {
    /// Create from ordinal
    #[inline]
    #[must_use]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Ordinal value
    #[inline]
    #[must_use]
    pub const fn level(self) -> u32 {
        self.0
    }

    /// Check if this runtime satisfies `minimum`
    #[inline]
    #[must_use]
    pub fn satisfies(self, minimum: RuntimeVersion) -> bool {
        self >= minimum
    }
}

impl From<u32> for RuntimeVersion {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl Display for RuntimeVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RuntimeVersion {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IdentError::InvalidRuntimeVersion(s.to_string());
        let mut parts = s.trim().split('.');
        let first: u32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(invalid)?;

        if first == 1 {
            // legacy 1.x numbering
            if let Some(second) = parts.next() {
                return second.parse().map(Self).map_err(|_| invalid());
            }
        }
        Ok(Self(first))
    }
}
