//! featshift Feature Resolution
//!
//! Decides which features a configuration keeps, loses and gains when a
//! test pass moves it to another specification generation.
//!
//! # Core Concepts
//!
//! - [`FeatureChanges`]: remove / add / always-add sets plus a [`ReplacementMode`]
//! - [`FeatureResolver`]: applies changes to a feature set
//! - [`BaseNameRenames`]: second-stage lookup for features renamed between
//!   generations (`jsp` ⇄ `pages`)
//!
//! # Example
//!
//! ```rust
//! use featshift_resolve::{BaseNameRenames, FeatureChanges, FeatureResolver, ReplacementMode, feature_set};
//!
//! let renames = BaseNameRenames::builtin();
//! let resolver = FeatureResolver::new(&renames);
//!
//! let current = feature_set(["servlet-4.0", "cdi-2.0"]).unwrap();
//! let changes = FeatureChanges::parse(["servlet-4.0"], ["servlet-5.0"], [], ReplacementMode::Forced).unwrap();
//!
//! let resolved = resolver.resolve(&current, &changes).unwrap();
//! assert_eq!(resolved, feature_set(["servlet-5.0", "cdi-2.0"]).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod changes;
pub mod error;
pub mod renames;
pub mod resolver;

// Re-exports
pub use changes::{feature_set, FeatureChanges, ReplacementMode};
pub use error::ResolveError;
pub use renames::BaseNameRenames;
pub use resolver::FeatureResolver;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
