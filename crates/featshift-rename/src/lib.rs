//! featshift Rename Engine
//!
//! Boundary-safe rewriting of package and class names embedded in text.
//!
//! # Core Operations
//!
//! - **Load**: Read a `key=value` rule source into an ordered [`RenameTable`]
//! - **Match**: [`BoundaryMatcher`] accepts an occurrence only when it is not
//!   part of a longer identifier
//! - **Select**: [`RuleBook`] picks the table for a target [`SpecVersion`]
//!
//! # Architecture
//!
//! ```text
//! rules.properties → RenameTable ─┐
//!                                 ├→ RuleBook ─(SpecVersion)→ BoundaryMatcher → text'
//! builtin jakarta  → RenameTable ─┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use featshift_rename::{BoundaryMatcher, RenameTable};
//!
//! let table = RenameTable::from_properties("javax.servlet.*=jakarta.servlet").unwrap();
//! let out = BoundaryMatcher::new().rewrite("javax.servlet.http.HttpServlet", &table);
//! assert_eq!(out, "jakarta.servlet.http.HttpServlet");
//! ```
//!
//! [`SpecVersion`]: featshift_ident::SpecVersion

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod book;
pub mod error;
pub mod matcher;
pub mod rule;
pub mod table;

// Re-exports
pub use book::RuleBook;
pub use error::RenameError;
pub use matcher::BoundaryMatcher;
pub use rule::{RenameRule, RuleKey};
pub use table::RenameTable;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
