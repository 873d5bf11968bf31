//! Plan selection over a small three-generation catalog

use featshift_ident::RuntimeVersion;
use featshift_plan::{ConfigTargets, RepeatAction, RunEnvironment, TestMode, VersionSelector};
use featshift_test_utils::{feature, small_catalog, MID_SET, NEW_SET, OLD_SET};
use pretty_assertions::assert_eq;

fn steps(runtime: u32) -> Vec<(String, TestMode)> {
    let catalog = small_catalog();
    let env = RunEnvironment::new(runtime, TestMode::Full);
    VersionSelector::repeat(&catalog, NEW_SET, &[MID_SET, OLD_SET], &env, TestMode::Full, &ConfigTargets::All)
        .unwrap()
        .iter()
        .map(|step| (step.id().to_string(), step.test_mode()))
        .collect()
}

#[test]
fn new_runtime_keeps_requested_order() {
    assert_eq!(
        steps(17),
        [
            (NEW_SET.to_string(), TestMode::Lite),
            (MID_SET.to_string(), TestMode::Full),
            (OLD_SET.to_string(), TestMode::Full),
        ]
    );
}

#[test]
fn mid_runtime_promotes_mid_set() {
    assert_eq!(
        steps(11),
        [(MID_SET.to_string(), TestMode::Lite), (OLD_SET.to_string(), TestMode::Full)]
    );
}

#[test]
fn old_runtime_promotes_old_set() {
    assert_eq!(steps(8), [(OLD_SET.to_string(), TestMode::Lite), (MID_SET.to_string(), TestMode::Full)]);
}

#[test]
fn ancient_runtime_keeps_everything_and_runs_nothing() {
    let catalog = small_catalog();
    let env = RunEnvironment::new(7, TestMode::Experimental);
    let plan = VersionSelector::repeat(&catalog, NEW_SET, &[MID_SET, OLD_SET], &env, TestMode::Full, &ConfigTargets::All)
        .unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan.runnable(&env).count(), 0);
}

#[test]
fn every_step_is_self_contained() {
    let catalog = small_catalog();
    let plan = VersionSelector::new(&catalog)
        .plan(
            catalog.require(NEW_SET).unwrap(),
            &[catalog.require(OLD_SET).unwrap()],
            RuntimeVersion::new(17),
            TestMode::Lite,
            &ConfigTargets::named(["web"]),
        )
        .unwrap();

    let old = plan.get(OLD_SET).unwrap();
    let changes = old.changes().unwrap();
    assert!(changes.add.contains(&feature("servlet-4.0")));
    assert!(changes.remove.iter().any(|p| p.matches(&feature("servlet-6.1"))));
    assert!(changes.remove.iter().any(|p| p.matches(&feature("servlet-6.0"))));
    assert!(old.targets().includes("web"));
    assert!(!old.targets().includes("rest"));
}
