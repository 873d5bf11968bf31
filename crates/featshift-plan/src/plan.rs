//! Execution plans
//!
//! An [`ExecutionPlan`] is the ordered list of passes over the test corpus.
//! It is built once, never modified, and consumed top to bottom. Enablement
//! is re-checked right before each step runs, so a disabled step never
//! affects later ones.

use crate::action::{ConfigTargets, EmptyAction, FeatureReplacementAction, RepeatAction};
use crate::error::PlanError;
use crate::mode::{RunEnvironment, SkipReason, TestMode};
use featshift_ident::SpecVersion;
use featshift_resolve::FeatureChanges;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One entry of an execution plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepeatStep {
    /// Run configurations as declared
    Unmodified(EmptyAction),
    /// Replace features first
    Replace(FeatureReplacementAction),
}

impl From<EmptyAction> for RepeatStep {
    fn from(action: EmptyAction) -> Self {
        Self::Unmodified(action)
    }
}

impl From<FeatureReplacementAction> for RepeatStep {
    fn from(action: FeatureReplacementAction) -> Self {
        Self::Replace(action)
    }
}

impl RepeatStep {
    fn action(&self) -> &dyn RepeatAction {
        match self {
            Self::Unmodified(action) => action,
            Self::Replace(action) => action,
        }
    }
}

impl RepeatAction for RepeatStep {
    fn id(&self) -> &str {
        self.action().id()
    }

    fn test_mode(&self) -> TestMode {
        self.action().test_mode()
    }

    fn skip_reason(&self, env: &RunEnvironment) -> Option<SkipReason> {
        self.action().skip_reason(env)
    }

    fn spec_version(&self) -> Option<SpecVersion> {
        self.action().spec_version()
    }

    fn changes(&self) -> Option<&FeatureChanges> {
        self.action().changes()
    }

    fn targets(&self) -> &ConfigTargets {
        self.action().targets()
    }
}

/// Ordered, immutable list of repeat steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    steps: Vec<RepeatStep>,
}

impl ExecutionPlan {
    /// Start building a plan
    #[inline]
    #[must_use]
    pub fn builder() -> ExecutionPlanBuilder {
        ExecutionPlanBuilder::default()
    }

    /// Steps in execution order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[RepeatStep] {
        &self.steps
    }

    /// Step ids in execution order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(RepeatAction::id)
    }

    /// Step with `id`
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RepeatStep> {
        self.steps.iter().find(|step| step.id() == id)
    }

    /// Steps enabled in `env`, in execution order
    pub fn runnable<'a>(&'a self, env: &'a RunEnvironment) -> impl Iterator<Item = &'a RepeatStep> + 'a {
        self.steps.iter().filter(move |step| step.is_enabled(env))
    }

    /// Iterate over steps
    pub fn iter(&self) -> std::slice::Iter<'_, RepeatStep> {
        self.steps.iter()
    }

    /// Number of steps
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if plan has no steps
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<'a> IntoIterator for &'a ExecutionPlan {
    type Item = &'a RepeatStep;
    type IntoIter = std::slice::Iter<'a, RepeatStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Builder for [`ExecutionPlan`]
#[derive(Debug, Clone, Default)]
pub struct ExecutionPlanBuilder {
    steps: Vec<RepeatStep>,
}

impl ExecutionPlanBuilder {
    /// Append a step
    #[must_use]
    pub fn with(mut self, step: impl Into<RepeatStep>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Append another step
    #[inline]
    #[must_use]
    pub fn and_with(self, step: impl Into<RepeatStep>) -> Self {
        self.with(step)
    }

    /// Freeze into a plan
    ///
    /// # Errors
    /// `PlanError::DuplicateStep` if two steps share an id
    pub fn build(self) -> Result<ExecutionPlan, PlanError> {
        let mut seen = IndexSet::new();
        for step in &self.steps {
            if !seen.insert(step.id()) {
                return Err(PlanError::DuplicateStep {
                    id: step.id().to_string(),
                });
            }
        }
        Ok(ExecutionPlan { steps: self.steps })
    }
}
