//! featshift Repeat Planning
//!
//! Knows every feature set, and turns a request like "run EE11, then EE10
//! and EE9" into an ordered plan that fits the runtime at hand.
//!
//! # Core Concepts
//!
//! - [`FeatureSet`]: immutable, versioned group of features
//! - [`FeatureCatalog`]: every known set, newest first
//! - [`RepeatAction`]: one pass over the test corpus
//! - [`ExecutionPlan`]: ordered passes, built once
//! - [`VersionSelector`]: substitutes a compatible first set on old runtimes
//!
//! # Example
//!
//! ```rust
//! use featshift_plan::{ConfigTargets, FeatureCatalog, RepeatAction, RunEnvironment, TestMode, VersionSelector};
//!
//! let catalog = FeatureCatalog::builtin();
//! let env = RunEnvironment::new(11, TestMode::Full);
//! let plan = VersionSelector::repeat(
//!     &catalog,
//!     "EE11_FEATURES",
//!     &["EE10_FEATURES", "EE9_FEATURES"],
//!     &env,
//!     TestMode::Full,
//!     &ConfigTargets::All,
//! )
//! .unwrap();
//!
//! let ids: Vec<_> = plan.ids().collect();
//! assert_eq!(ids, ["EE10_FEATURES", "EE9_FEATURES"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod catalog;
pub mod error;
pub mod feature_set;
pub mod mode;
pub mod plan;
pub mod selector;

// Re-exports
pub use action::{
    ConfigTargets, EmptyAction, FeatureReplacementAction, RepeatAction, DEFAULT_REPLACEMENT_ID,
    NO_MODIFICATION_ACTION,
};
pub use catalog::{FeatureCatalog, EE10_FEATURES, EE11_FEATURES, EE7_FEATURES, EE8_FEATURES, EE9_FEATURES};
pub use error::PlanError;
pub use feature_set::{FeatureSet, FeatureSetBuilder};
pub use mode::{RunEnvironment, SkipReason, TestMode};
pub use plan::{ExecutionPlan, ExecutionPlanBuilder, RepeatStep};
pub use selector::{Selection, VersionSelector};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
