//! Version-aware plan selection
//!
//! Provides [`VersionSelector`], which orders feature sets into an
//! [`ExecutionPlan`]. When the runtime is too old for the requested first
//! set, the newest compatible set among the others runs first instead.

use crate::action::{ConfigTargets, FeatureReplacementAction};
use crate::catalog::FeatureCatalog;
use crate::error::PlanError;
use crate::feature_set::FeatureSet;
use crate::mode::{RunEnvironment, TestMode};
use crate::plan::ExecutionPlan;
use featshift_ident::RuntimeVersion;

/// First set and remaining sets after fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Set run first, in lite mode
    pub first: &'a FeatureSet,
    /// Remaining sets in requested order
    pub others: Vec<&'a FeatureSet>,
    /// Whether `first` replaced the requested set
    pub fell_back: bool,
}

/// Builds execution plans from a catalog
#[derive(Debug, Clone, Copy)]
pub struct VersionSelector<'a> {
    catalog: &'a FeatureCatalog,
}

impl<'a> VersionSelector<'a> {
    /// Create selector over `catalog`
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a FeatureCatalog) -> Self {
        Self { catalog }
    }

    /// Pick the first set for `runtime`
    ///
    /// If `first` needs a newer runtime, the catalog is walked in its
    /// declared order and the first entry of `others` that runs on `runtime`
    /// takes its place; the requested set is dropped. Without such an entry
    /// `first` is kept and left to its enablement check.
    #[must_use]
    pub fn select(&self, first: &'a FeatureSet, others: &[&'a FeatureSet], runtime: RuntimeVersion) -> Selection<'a> {
        let mut others = others.to_vec();
        if first.runs_on(runtime) {
            return Selection {
                first,
                others,
                fell_back: false,
            };
        }

        let fallback = self
            .catalog
            .iter()
            .find(|candidate| candidate.runs_on(runtime) && others.iter().any(|other| other.id() == candidate.id()));

        match fallback {
            Some(chosen) => {
                others.retain(|other| other.id() != chosen.id());
                tracing::info!(
                    requested = first.id(),
                    chosen = chosen.id(),
                    %runtime,
                    "Runtime too old for requested feature set, running newest compatible first"
                );
                Selection {
                    first: chosen,
                    others,
                    fell_back: true,
                }
            }
            None => {
                tracing::warn!(
                    requested = first.id(),
                    newest_compatible = self.catalog.newest_compatible(runtime).map(FeatureSet::id),
                    %runtime,
                    "No requested feature set runs on this runtime"
                );
                Selection {
                    first,
                    others,
                    fell_back: false,
                }
            }
        }
    }

    /// Build the plan: `first` in lite mode, then `others` in `default_mode`
    ///
    /// # Errors
    /// `PlanError::DuplicateStep` if a set appears twice
    pub fn plan(
        &self,
        first: &'a FeatureSet,
        others: &[&'a FeatureSet],
        runtime: RuntimeVersion,
        default_mode: TestMode,
        targets: &ConfigTargets,
    ) -> Result<ExecutionPlan, PlanError> {
        self.plan_selection(self.select(first, others, runtime), default_mode, targets)
    }

    /// Build the plan for a selection already made with [`Self::select`]
    ///
    /// # Errors
    /// `PlanError::DuplicateStep` if a set appears twice
    pub fn plan_selection(
        &self,
        selection: Selection<'a>,
        default_mode: TestMode,
        targets: &ConfigTargets,
    ) -> Result<ExecutionPlan, PlanError> {
        let mut builder = ExecutionPlan::builder().with(FeatureReplacementAction::for_feature_set(
            self.catalog,
            selection.first,
            targets.clone(),
            TestMode::Lite,
        ));
        for set in selection.others {
            builder = builder.and_with(FeatureReplacementAction::for_feature_set(
                self.catalog,
                set,
                targets.clone(),
                default_mode,
            ));
        }
        builder.build()
    }

    /// Resolve ids through `catalog` and build the plan
    ///
    /// # Errors
    /// - `PlanError::UnknownFeatureSet` for an id missing from the catalog
    /// - `PlanError::DuplicateStep` if an id appears twice
    pub fn repeat(
        catalog: &FeatureCatalog,
        first_id: &str,
        other_ids: &[&str],
        env: &RunEnvironment,
        default_mode: TestMode,
        targets: &ConfigTargets,
    ) -> Result<ExecutionPlan, PlanError> {
        let first = catalog.require(first_id)?;
        let others = other_ids
            .iter()
            .map(|id| catalog.require(id))
            .collect::<Result<Vec<_>, _>>()?;
        VersionSelector::new(catalog).plan(first, &others, env.runtime_version, default_mode, targets)
    }
}
