//! featshift Core
//!
//! Re-runs a test corpus against successive platform generations. For each
//! pass of an execution plan, configurations get their features swapped and
//! text artifacts get their package names rewritten.
//!
//! # Architecture
//!
//! ```text
//! Settings ──load_catalog──▶ MigrationContext (read-only)
//!                                  │
//! VersionSelector ──▶ ExecutionPlan ──▶ RepeatRunner
//!                                          │ per step
//!                                          ▼
//!                                   ConfigRewriter ──▶ PassExecutor
//! ```
//!
//! # Example
//!
//! ```rust
//! use featshift_core::{Configuration, MigrationContext, PassContext, RepeatRunner, Settings};
//! use featshift_plan::{ConfigTargets, TestMode, VersionSelector};
//!
//! let settings = Settings::new().with_runtime_version(11).with_test_mode(TestMode::Full);
//! let context = MigrationContext::load_catalog(&settings).unwrap();
//! let env = settings.environment();
//!
//! let plan = VersionSelector::repeat(
//!     context.catalog(),
//!     "EE10_FEATURES",
//!     &["EE9_FEATURES"],
//!     &env,
//!     TestMode::Full,
//!     &ConfigTargets::All,
//! )
//! .unwrap();
//!
//! let mut configs = vec![Configuration::parse("server", ["servlet-4.0"]).unwrap()];
//! let report = RepeatRunner::new(&context, &plan, env).run(&mut configs, &mut |_: &PassContext<'_>| Ok(()));
//! assert!(report.is_success());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod configuration;
pub mod context;
pub mod error;
pub mod rewriter;
pub mod runner;
pub mod settings;

// Re-exports
pub use configuration::Configuration;
pub use context::MigrationContext;
pub use error::{CoreError, Result};
pub use rewriter::{ConfigChange, ConfigRewriter};
pub use runner::{PassContext, PassExecutor, PassRecord, PassStatus, RepeatRunner, RunReport};
pub use settings::{RuleSource, Settings, DEFAULT_RUNTIME_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
