//! Error types for rule-table loading
//!
//! Matching never fails: an occurrence that is not a true match is simply
//! left alone. Only reading and parsing rule sources can go wrong.

use std::path::PathBuf;

/// Errors while loading a rename table
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    /// IO error during rule source read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line has neither `=` nor `:` separator
    #[error("malformed rule at line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    /// Line has a separator but no key
    #[error("empty rule key at line {line}")]
    EmptyKey { line: usize },
}

impl RenameError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed line error
    pub fn malformed(line: usize, content: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = RenameError::malformed(3, "javax.servlet");
        assert_eq!(err.to_string(), "malformed rule at line 3: 'javax.servlet'");
    }

    #[test]
    fn io_display_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = RenameError::io_error("/tmp/rules.properties", source);
        assert!(err.to_string().contains("/tmp/rules.properties"));
    }
}
