//! Repeat runs
//!
//! [`RepeatRunner`] walks an [`ExecutionPlan`] top to bottom. For each step
//! it resets every configuration, re-checks enablement, rewrites the
//! targeted configurations and hands a [`PassContext`] to the caller's
//! [`PassExecutor`]. The outcome of every step lands in a [`RunReport`].
//!
//! A failing step is recorded and the run moves on to the next one.

use crate::configuration::Configuration;
use crate::context::MigrationContext;
use crate::rewriter::{ConfigChange, ConfigRewriter};
use featshift_ident::SpecVersion;
use featshift_plan::{ExecutionPlan, RepeatAction, RepeatStep, RunEnvironment, SkipReason};
use serde::{Deserialize, Serialize};

/// What the executor sees while one step is active
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    step: &'a RepeatStep,
    configurations: &'a [Configuration],
    rewriter: ConfigRewriter<'a>,
}

impl<'a> PassContext<'a> {
    /// Active step
    #[inline]
    #[must_use]
    pub fn step(&self) -> &'a RepeatStep {
        self.step
    }

    /// Id of the active step
    #[inline]
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.step.id()
    }

    /// Generation of the active step, if it has one
    #[inline]
    #[must_use]
    pub fn spec_version(&self) -> Option<SpecVersion> {
        self.step.spec_version()
    }

    /// Check if the step with `id` is the active one
    #[inline]
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.step.id() == id
    }

    /// Configurations as rewritten for this step
    #[inline]
    #[must_use]
    pub fn configurations(&self) -> &'a [Configuration] {
        self.configurations
    }

    /// Configuration called `name`
    #[must_use]
    pub fn configuration(&self, name: &str) -> Option<&'a Configuration> {
        self.configurations.iter().find(|config| config.name() == name)
    }

    /// Rewrite a text artifact with the active step's rename table
    #[must_use]
    pub fn rewrite_text(&self, text: &str) -> String {
        self.rewriter.rewrite_text(self.step, text)
    }
}

/// Runs the tests of one pass
pub trait PassExecutor {
    /// Execute the pass described by `ctx`
    ///
    /// # Errors
    /// Any failure of the pass; it is recorded in the report
    fn execute(&mut self, ctx: &PassContext<'_>) -> anyhow::Result<()>;
}

impl<F> PassExecutor for F
where
    F: FnMut(&PassContext<'_>) -> anyhow::Result<()>,
{
    fn execute(&mut self, ctx: &PassContext<'_>) -> anyhow::Result<()> {
        self(ctx)
    }
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PassStatus {
    /// Step ran to completion
    Ran {
        /// Configuration changes made for the step
        changes: Vec<ConfigChange>,
    },
    /// Step was not enabled
    Skipped {
        /// Why it was skipped
        skip: SkipReason,
    },
    /// Rewriting or execution failed
    Failed {
        /// Error message with causes
        error: String,
    },
}

/// Record of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    /// Step id
    pub id: String,
    /// Step generation
    pub spec_version: Option<SpecVersion>,
    /// Outcome
    #[serde(flatten)]
    pub status: PassStatus,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Environment the run used
    pub environment: RunEnvironment,
    /// One record per plan step, in plan order
    pub passes: Vec<PassRecord>,
}

impl RunReport {
    /// Ids of steps that ran
    pub fn ran(&self) -> impl Iterator<Item = &str> {
        self.with_status(|status| matches!(status, PassStatus::Ran { .. }))
    }

    /// Ids of skipped steps
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.with_status(|status| matches!(status, PassStatus::Skipped { .. }))
    }

    /// Ids of failed steps
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.with_status(|status| matches!(status, PassStatus::Failed { .. }))
    }

    /// Check if no step failed
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Record for step `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PassRecord> {
        self.passes.iter().find(|record| record.id == id)
    }

    fn with_status(&self, keep: fn(&PassStatus) -> bool) -> impl Iterator<Item = &str> {
        self.passes
            .iter()
            .filter(move |record| keep(&record.status))
            .map(|record| record.id.as_str())
    }
}

/// Executes a plan against a set of configurations
#[derive(Debug, Clone, Copy)]
pub struct RepeatRunner<'a> {
    context: &'a MigrationContext,
    plan: &'a ExecutionPlan,
    env: RunEnvironment,
}

impl<'a> RepeatRunner<'a> {
    /// Create runner
    #[inline]
    #[must_use]
    pub fn new(context: &'a MigrationContext, plan: &'a ExecutionPlan, env: RunEnvironment) -> Self {
        Self { context, plan, env }
    }

    /// Run every step
    ///
    /// Configurations are reset before each step and once more at the end,
    /// so they leave the run as they entered it.
    pub fn run(&self, configs: &mut [Configuration], executor: &mut impl PassExecutor) -> RunReport {
        let rewriter = ConfigRewriter::new(self.context);
        let mut report = RunReport {
            environment: self.env,
            passes: Vec::with_capacity(self.plan.len()),
        };

        for step in self.plan {
            configs.iter_mut().for_each(Configuration::reset);
            let status = self.run_step(&rewriter, step, configs, executor);
            report.passes.push(PassRecord {
                id: step.id().to_string(),
                spec_version: step.spec_version(),
                status,
            });
        }

        configs.iter_mut().for_each(Configuration::reset);
        report
    }

    fn run_step(
        &self,
        rewriter: &ConfigRewriter<'a>,
        step: &RepeatStep,
        configs: &mut [Configuration],
        executor: &mut impl PassExecutor,
    ) -> PassStatus {
        if let Some(skip) = step.skip_reason(&self.env) {
            tracing::info!(step = step.id(), reason = %skip, "Skipping repeat step");
            return PassStatus::Skipped { skip };
        }

        let changes = match rewriter.apply_all(step, configs) {
            Ok(changes) => changes,
            Err(err) => {
                tracing::warn!(step = step.id(), error = %err, "Failed to rewrite configurations");
                return PassStatus::Failed { error: err.to_string() };
            }
        };

        tracing::info!(step = step.id(), "Running repeat step");
        let ctx = PassContext {
            step,
            configurations: configs,
            rewriter: *rewriter,
        };
        match executor.execute(&ctx) {
            Ok(()) => PassStatus::Ran { changes },
            Err(err) => {
                tracing::warn!(step = step.id(), error = %err, "Repeat step failed");
                PassStatus::Failed {
                    error: format!("{err:#}"),
                }
            }
        }
    }
}
