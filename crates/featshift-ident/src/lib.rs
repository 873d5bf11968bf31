//! featshift Identifiers
//!
//! Typed names shared by every other featshift crate.
//!
//! # Core Concepts
//!
//! - [`FeatureId`]: Lower-cased feature short-name (`servlet-4.0`)
//! - [`FeaturePattern`]: Exact feature or wildcard prefix (`jsp-*`)
//! - [`SpecVersion`]: Platform specification generation (`EE7` .. `EE11`)
//! - [`RuntimeVersion`]: Ordinal runtime level used for enablement checks
//!
//! # Example
//!
//! ```rust
//! use featshift_ident::{FeatureId, FeaturePattern};
//!
//! let id = FeatureId::new("Servlet-4.0").unwrap();
//! assert_eq!(id.as_str(), "servlet-4.0");
//! assert_eq!(id.base_name(), Some("servlet"));
//!
//! let pattern = FeaturePattern::parse("jsp-*").unwrap();
//! assert!(pattern.matches(&FeatureId::new("jsp-2.3").unwrap()));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod chars;
pub mod error;
pub mod feature;
pub mod version;

// Re-exports
pub use chars::{is_identifier_char, is_package_continuation};
pub use error::IdentError;
pub use feature::{FeatureId, FeaturePattern};
pub use version::{RuntimeVersion, SpecVersion};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
