use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use featshift_core::{MigrationContext, Settings};
use featshift_ident::{RuntimeVersion, SpecVersion};
use featshift_plan::{ConfigTargets, RepeatAction, TestMode};
use featshift_rename::{BoundaryMatcher, RenameTable};
use featshift_resolve::{FeatureChanges, ReplacementMode};
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let json_flag = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON");
    let list = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .long(name)
            .value_delimiter(',')
            .num_args(1..)
            .help(help)
    };

    Command::new("featshift")
        .version(featshift_core::VERSION)
        .about("Move server configurations and sources between platform generations")
        .subcommand_required(true)
        .arg(
            Arg::new("settings")
                .long("settings")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML settings file"),
        )
        .subcommand(
            Command::new("plan")
                .about("Show the repeat plan for this environment")
                .arg(Arg::new("first").long("first").required(true).help("Feature set to run first"))
                .arg(list("others", "Feature sets to run afterwards"))
                .arg(
                    Arg::new("runtime")
                        .long("runtime")
                        .value_parser(value_parser!(RuntimeVersion))
                        .help("Runtime version, overrides settings"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .value_parser(value_parser!(TestMode))
                        .help("Test mode of this run, overrides settings"),
                )
                .arg(
                    Arg::new("default-mode")
                        .long("default-mode")
                        .default_value("full")
                        .value_parser(value_parser!(TestMode))
                        .help("Test mode of the steps after the first"),
                )
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Apply feature changes to a feature list")
                .arg(list("current", "Current features").required(true))
                .arg(list("remove", "Features to remove, wildcards allowed"))
                .arg(list("add", "Replacement candidates"))
                .arg(list("always-add", "Features added unconditionally"))
                .arg(
                    Arg::new("forced")
                        .long("forced")
                        .action(ArgAction::SetTrue)
                        .help("Add every candidate, not just replacements"),
                )
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("rename")
                .about("Rewrite package names in text read from stdin")
                .arg(
                    Arg::new("spec-version")
                        .long("spec-version")
                        .default_value("EE9")
                        .value_parser(value_parser!(SpecVersion))
                        .help("Target generation"),
                )
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .value_parser(value_parser!(PathBuf))
                        .help("Properties file used instead of the registered tables"),
                )
                .arg(json_flag),
        )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let settings = match matches.get_one::<PathBuf>("settings") {
        Some(path) => Settings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match matches.subcommand() {
        Some(("plan", args)) => plan(&settings, args),
        Some(("resolve", args)) => resolve(&settings, args),
        Some(("rename", args)) => rename(&settings, args),
        _ => Ok(()),
    }
}

fn values<'a>(args: &'a ArgMatches, name: &str) -> impl Iterator<Item = &'a str> {
    args.get_many::<String>(name)
        .into_iter()
        .flatten()
        .map(String::as_str)
}

fn plan(settings: &Settings, args: &ArgMatches) -> Result<()> {
    let context = MigrationContext::load_catalog(settings).context("loading migration context")?;

    let mut env = settings.environment();
    if let Some(runtime) = args.get_one::<RuntimeVersion>("runtime") {
        env = env.with_runtime_version(*runtime);
    }
    if let Some(mode) = args.get_one::<TestMode>("mode") {
        env = env.with_test_mode(*mode);
    }
    let default_mode = args.get_one::<TestMode>("default-mode").copied().unwrap_or(TestMode::Full);
    let first_id = args.get_one::<String>("first").map(String::as_str).unwrap_or_default();

    let catalog = context.catalog();
    let first = catalog.require(first_id)?;
    let others = values(args, "others")
        .map(|id| catalog.require(id))
        .collect::<Result<Vec<_>, _>>()?;
    let selector = context.selector();
    let selection = selector.select(first, &others, env.runtime_version);
    let replaced = selection.fell_back.then_some(first.id());
    let plan = selector
        .plan_selection(selection, default_mode, &ConfigTargets::All)
        .context("building execution plan")?;

    if args.get_flag("json") {
        let steps: Vec<_> = plan
            .iter()
            .map(|step| {
                json!({
                    "id": step.id(),
                    "test_mode": step.test_mode(),
                    "spec_version": step.spec_version(),
                    "skip": step.skip_reason(&env),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "environment": env, "replaced": replaced, "steps": steps }))?
        );
    } else {
        println!("Runtime {} / {}", env.runtime_version, env.test_mode);
        if let Some(requested) = replaced {
            println!("  {requested} needs a newer runtime, running the newest compatible set first");
        }
        for step in &plan {
            match step.skip_reason(&env) {
                Some(reason) => println!("  - {} [{}] skipped: {}", step.id(), step.test_mode(), reason),
                None => println!("  + {} [{}]", step.id(), step.test_mode()),
            }
        }
    }
    Ok(())
}

fn resolve(settings: &Settings, args: &ArgMatches) -> Result<()> {
    let context = MigrationContext::load_catalog(settings).context("loading migration context")?;

    let mode = if args.get_flag("forced") {
        ReplacementMode::Forced
    } else {
        ReplacementMode::Smart
    };
    let current = featshift_resolve::feature_set(values(args, "current")).context("parsing current features")?;
    let changes = FeatureChanges::parse(
        values(args, "remove"),
        values(args, "add"),
        values(args, "always-add"),
        mode,
    )
    .context("parsing feature changes")?;

    let resolved = context.resolver().resolve(&current, &changes)?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        for feature in &resolved {
            println!("{feature}");
        }
    }
    Ok(())
}

fn rename(settings: &Settings, args: &ArgMatches) -> Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text).context("reading stdin")?;

    let table = match args.get_one::<PathBuf>("rules") {
        Some(path) => RenameTable::load(path)?,
        None => {
            let version = args.get_one::<SpecVersion>("spec-version").copied().unwrap_or(SpecVersion::Ee9);
            let context = MigrationContext::load_catalog(settings).context("loading migration context")?;
            context.rules().for_version(version).cloned().unwrap_or_default()
        }
    };

    let rewritten = BoundaryMatcher::new().rewrite(&text, &table);
    if args.get_flag("json") {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "changed": rewritten != text, "text": rewritten }))?
        );
    } else {
        print!("{rewritten}");
    }
    Ok(())
}
