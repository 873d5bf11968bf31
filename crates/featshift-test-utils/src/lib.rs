//! Testing utilities for featshift workspace
//!
//! Shared test helpers and fixtures.

#![allow(missing_docs)]

use featshift_core::{Configuration, MigrationContext};
use featshift_ident::{FeatureId, SpecVersion};
use featshift_plan::{FeatureCatalog, FeatureSet};
use featshift_rename::{RenameTable, RuleBook};
use featshift_resolve::BaseNameRenames;
use indexmap::IndexSet;

pub const OLD_SET: &str = "OLD";
pub const MID_SET: &str = "MID";
pub const NEW_SET: &str = "NEW";

pub fn feature(name: &str) -> FeatureId {
    FeatureId::new(name).unwrap()
}

pub fn features(names: &[&str]) -> IndexSet<FeatureId> {
    names.iter().map(|name| feature(name)).collect()
}

/// Three-generation catalog, newest first: NEW (runtime 17), MID (11), OLD (8)
pub fn small_catalog() -> FeatureCatalog {
    let set = |id: &str, version: SpecVersion, runtime: u32, names: &[&str]| {
        FeatureSet::builder(id)
            .with_spec_version(version)
            .with_min_runtime_version(runtime)
            .add_features(features(names))
            .build()
    };

    FeatureCatalog::from_sets([
        set(NEW_SET, SpecVersion::Ee11, 17, &["servlet-6.1", "pages-4.0", "cdi-4.1"]),
        set(MID_SET, SpecVersion::Ee10, 11, &["servlet-6.0", "pages-3.1", "cdi-4.0"]),
        set(OLD_SET, SpecVersion::Ee8, 8, &["servlet-4.0", "jsp-2.3", "cdi-2.0"]),
    ])
    .unwrap()
}

pub fn jakarta_table() -> RenameTable {
    RenameTable::from_pairs([
        ("javax.servlet.*", "jakarta.servlet"),
        ("javax.el", "jakarta.el"),
        ("javax.annotation", "jakarta.annotation"),
    ])
}

pub fn small_context() -> MigrationContext {
    let mut rules = RuleBook::new();
    rules.register(SpecVersion::Ee9, jakarta_table());
    MigrationContext::new(small_catalog(), rules, BaseNameRenames::builtin())
}

pub fn config(name: &str, names: &[&str]) -> Configuration {
    Configuration::new(name, features(names))
}

pub fn old_servers() -> Vec<Configuration> {
    vec![
        config("web", &["servlet-4.0", "jsp-2.3", "componenttest-1.0"]),
        config("cdi", &["cdi-2.0"]),
        config("plain", &["timedexit-1.0"]),
    ]
}
