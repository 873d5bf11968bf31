//! Full repeat runs over the shared fixtures

use featshift_core::{ConfigRewriter, PassContext, PassStatus, RepeatRunner};
use featshift_plan::{ConfigTargets, RepeatAction, RunEnvironment, TestMode, VersionSelector};
use featshift_test_utils::{feature, old_servers, small_context, MID_SET, NEW_SET, OLD_SET};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

#[test]
fn each_pass_sees_its_own_generation() {
    let context = small_context();
    let env = RunEnvironment::new(17, TestMode::Full);
    let plan = VersionSelector::repeat(context.catalog(), NEW_SET, &[MID_SET, OLD_SET], &env, TestMode::Full, &ConfigTargets::All)
        .unwrap();
    let mut configs = old_servers();
    let mut web_features = BTreeMap::new();

    let report = RepeatRunner::new(&context, &plan, env).run(&mut configs, &mut |ctx: &PassContext<'_>| {
        let web = ctx.configuration("web").unwrap();
        let names: Vec<String> = web.features().iter().map(ToString::to_string).collect();
        web_features.insert(ctx.id().to_string(), names);
        Ok(())
    });

    assert!(report.is_success());
    assert_eq!(web_features[NEW_SET], ["componenttest-1.0", "servlet-6.1", "pages-4.0"]);
    assert_eq!(web_features[MID_SET], ["componenttest-1.0", "servlet-6.0", "pages-3.1"]);
    assert_eq!(web_features[OLD_SET], ["servlet-4.0", "jsp-2.3", "componenttest-1.0"]);
}

#[test]
fn untouched_config_reports_no_change() {
    let context = small_context();
    let env = RunEnvironment::new(17, TestMode::Lite);
    let plan = VersionSelector::repeat(context.catalog(), NEW_SET, &[], &env, TestMode::Full, &ConfigTargets::All).unwrap();
    let mut configs = old_servers();

    let report = RepeatRunner::new(&context, &plan, env).run(&mut configs, &mut |_: &PassContext<'_>| Ok(()));

    let PassStatus::Ran { changes } = &report.get(NEW_SET).unwrap().status else {
        panic!("expected {NEW_SET} to run");
    };
    let plain = changes.iter().find(|change| change.name == "plain").unwrap();
    assert!(plain.is_empty());
    let cdi = changes.iter().find(|change| change.name == "cdi").unwrap();
    assert_eq!(cdi.removed, [feature("cdi-2.0")]);
    assert_eq!(cdi.added, [feature("cdi-4.1")]);
}

#[test]
fn text_uses_table_of_step_generation() {
    let context = small_context();
    let rewriter = ConfigRewriter::new(&context);
    let env = RunEnvironment::new(17, TestMode::Full);
    let plan = VersionSelector::repeat(context.catalog(), NEW_SET, &[OLD_SET], &env, TestMode::Full, &ConfigTargets::All)
        .unwrap();

    let source = "import javax.servlet.http.HttpServlet;";
    let new = plan.get(NEW_SET).unwrap();
    let old = plan.get(OLD_SET).unwrap();
    assert_eq!(rewriter.rewrite_text(new, source), "import jakarta.servlet.http.HttpServlet;");
    assert_eq!(rewriter.rewrite_text(old, source), source);
    assert_eq!(new.spec_version().map(|v| v.tag()), Some("EE11"));
}
