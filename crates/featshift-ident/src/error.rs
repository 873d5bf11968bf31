//! Error types for identifier parsing

/// Errors when constructing identifiers or versions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentError {
    /// Identifier was empty after trimming
    #[error("empty identifier")]
    Empty,

    /// Identifier contains a character that cannot appear in a feature name
    #[error("invalid character {ch:?} in identifier '{raw}'")]
    InvalidCharacter {
        /// The offending input
        raw: String,
        /// The rejected character
        ch: char,
    },

    /// Unknown specification version tag
    #[error("unknown specification version: '{0}'")]
    UnknownSpecVersion(String),

    /// Runtime version could not be parsed
    #[error("invalid runtime version: '{0}'")]
    InvalidRuntimeVersion(String),
}

impl IdentError {
    /// Create invalid character error
    pub fn invalid_character(raw: impl Into<String>, ch: char) -> Self {
        Self::InvalidCharacter { raw: raw.into(), ch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_character_display() {
        let err = IdentError::invalid_character("a b", ' ');
        assert_eq!(err.to_string(), "invalid character ' ' in identifier 'a b'");
    }

    #[test]
    fn unknown_spec_display() {
        let err = IdentError::UnknownSpecVersion("EE99".to_string());
        assert_eq!(err.to_string(), "unknown specification version: 'EE99'");
    }
}
