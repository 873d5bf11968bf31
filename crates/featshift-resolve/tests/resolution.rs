//! End-to-end feature resolution across specification generations

use featshift_resolve::{feature_set, BaseNameRenames, FeatureChanges, FeatureResolver, ReplacementMode, ResolveError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EE8: &[&str] = &["servlet-4.0", "jsp-2.3", "el-3.0", "jsf-2.3", "cdi-2.0", "jaxrs-2.1"];
const EE9: &[&str] = &["servlet-5.0", "pages-3.0", "expressionlanguage-4.0", "faces-3.0", "cdi-3.0", "restfulws-3.0"];

#[test]
fn ee8_server_moves_to_ee9_smart() {
    let renames = BaseNameRenames::builtin();
    let resolver = FeatureResolver::new(&renames);

    let current = feature_set(["servlet-4.0", "jsp-2.3", "componenttest-1.0"]).unwrap();
    let changes = FeatureChanges::parse(EE8.iter().copied(), EE9.iter().copied(), [], ReplacementMode::Smart).unwrap();

    let resolved = resolver.resolve(&current, &changes).unwrap();
    assert_eq!(resolved, feature_set(["componenttest-1.0", "servlet-5.0", "pages-3.0"]).unwrap());
}

#[test]
fn ee8_server_moves_to_ee9_forced() {
    let renames = BaseNameRenames::builtin();
    let resolver = FeatureResolver::new(&renames);

    let current = feature_set(["servlet-4.0", "componenttest-1.0"]).unwrap();
    let changes = FeatureChanges::parse(EE8.iter().copied(), EE9.iter().copied(), [], ReplacementMode::Forced).unwrap();

    let resolved = resolver.resolve(&current, &changes).unwrap();
    let mut expected = feature_set(["componenttest-1.0"]).unwrap();
    expected.extend(feature_set(EE9.iter().copied()).unwrap());
    assert_eq!(resolved, expected);
}

#[test]
fn empty_rename_table_disables_fallback() {
    let renames = BaseNameRenames::new();
    let resolver = FeatureResolver::new(&renames);

    let current = feature_set(["jsp-2.3"]).unwrap();
    let changes = FeatureChanges::parse(["jsp-2.3"], ["pages-3.0"], [], ReplacementMode::Smart).unwrap();

    assert!(resolver.resolve(&current, &changes).unwrap().is_empty());
}

#[test]
fn versionless_removal_rejected() {
    let renames = BaseNameRenames::builtin();
    let changes = FeatureChanges::parse(["componenttest"], [], [], ReplacementMode::Smart).unwrap();
    let result = FeatureResolver::new(&renames).resolve(&Default::default(), &changes);
    assert!(matches!(result, Err(ResolveError::InvalidIdentifier { identifier }) if identifier == "componenttest"));
}

proptest! {
    #[test]
    fn forced_result_contains_every_addition(
        current in prop::collection::vec("[a-z]{1,6}-[0-9]\\.[0-9]", 0..8),
        add in prop::collection::vec("[a-z]{1,6}-[0-9]\\.[0-9]", 0..8),
    ) {
        let renames = BaseNameRenames::builtin();
        let current = feature_set(current.iter().map(String::as_str)).unwrap();
        let changes = FeatureChanges::parse(
            current.iter().map(|f| f.as_str()),
            add.iter().map(String::as_str),
            [],
            ReplacementMode::Forced,
        ).unwrap();

        let resolved = FeatureResolver::new(&renames).resolve(&current, &changes).unwrap();
        prop_assert_eq!(resolved, changes.add.clone());
    }

    #[test]
    fn smart_never_grows_unmatched(
        current in prop::collection::vec("[a-m]{1,6}-[0-9]\\.[0-9]", 0..8),
        remove in prop::collection::vec("[n-z]{1,6}-[0-9]\\.[0-9]", 0..8),
    ) {
        let renames = BaseNameRenames::new();
        let current = feature_set(current.iter().map(String::as_str)).unwrap();
        let changes = FeatureChanges::parse(
            remove.iter().map(String::as_str),
            ["servlet-5.0"],
            [],
            ReplacementMode::Smart,
        ).unwrap();

        let resolved = FeatureResolver::new(&renames).resolve(&current, &changes).unwrap();
        prop_assert_eq!(resolved, current);
    }
}
