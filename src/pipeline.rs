//! The per-invocation training pipeline.
//!
//! One invocation walks a fixed stage order: resolve the task and model,
//! derive schemas, merge config layers, run the pair's dispatch,
//! validate, construct. Failures abort between stages; nothing is
//! retried and nothing is constructed before validation passes.

use crate::component::{ComponentInstance, ComponentSelector, ComponentSpec};
use crate::config::{ConfigSources, ConfigTree, ResolvedConfig, merge, schema};
use crate::error::HarnessResult;
use crate::matrix::is_identity;
use crate::registry::HarnessRegistry;
use crate::trainer::Controller;
use std::sync::Arc;
use tracing::debug;

/// Stages of one training invocation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Idle,
    SchemasDerived,
    LayersMerged,
    Dispatched,
    Validated,
    InstancesConstructed,
}

/// A merged and dispatched config tree, not yet validated. Missing
/// fields still render in its YAML form.
#[derive(Debug)]
pub struct ComposedRun<'a> {
    pub task: &'a ComponentSpec,
    pub model: &'a ComponentSpec,
    pub tree: ConfigTree,
}

/// Everything resolved for a run, short of construction.
#[derive(Debug)]
pub struct PreparedRun<'a> {
    pub task: &'a ComponentSpec,
    pub model: &'a ComponentSpec,
    pub config: ResolvedConfig,
}

/// Instances built by a completed run.
#[derive(Debug)]
pub struct TrainOutcome {
    pub task: ComponentInstance,
    pub model: ComponentInstance,
}

/// Per-invocation pipeline borrowing a finished registry.
pub struct Pipeline<'a> {
    registry: &'a HarnessRegistry,
}

impl<'a> Pipeline<'a> {
    pub fn new(registry: &'a HarnessRegistry) -> Self {
        Self { registry }
    }

    /// Resolve components, derive schemas, merge layers, and apply the
    /// pair's dispatch. The returned tree may still carry missing
    /// fields; `prepare` is the validating form.
    pub fn compose<'t, 'm>(
        &self,
        task: impl Into<ComponentSelector<'t>>,
        model: impl Into<ComponentSelector<'m>>,
        sources: &ConfigSources,
    ) -> HarnessResult<ComposedRun<'a>> {
        debug!(stage = ?PipelineStage::Idle, "resolving components");
        let task_spec = self.registry.tasks().resolve(task)?;
        let model_spec = self.registry.models().resolve(model)?;

        let task_schema = schema::derive(task_spec);
        let model_schema = schema::derive(model_spec);
        let controller_schema = schema::derive(self.registry.controller());
        debug!(
            stage = ?PipelineStage::SchemasDerived,
            task = %task_spec.canonical_name(),
            model = %model_spec.canonical_name(),
            "schemas derived"
        );

        let defaults = ConfigTree::seeded(
            Arc::clone(&task_schema),
            Arc::clone(&model_schema),
            Arc::clone(&controller_schema),
        );
        let tree = merge(defaults, &sources.file, &sources.overrides)?;
        debug!(stage = ?PipelineStage::LayersMerged, "layers merged");

        let dispatch = self
            .registry
            .matrix()
            .lookup(&task_spec.canonical_name(), &model_spec.canonical_name())?;
        let (task_section, model_section, controller_section) = tree.into_sections();
        let (task_section, model_section) = dispatch(task_section, model_section)?;
        // Dispatches rewrite values, never schemas.
        debug_assert!(Arc::ptr_eq(task_section.schema(), &task_schema));
        debug_assert!(Arc::ptr_eq(model_section.schema(), &model_schema));
        let tree = ConfigTree::from_sections(task_section, model_section, controller_section);
        debug!(
            stage = ?PipelineStage::Dispatched,
            custom = !is_identity(dispatch),
            "dispatch applied"
        );

        Ok(ComposedRun {
            task: task_spec,
            model: model_spec,
            tree,
        })
    }

    /// Compose and validate. Everything but construction.
    pub fn prepare<'t, 'm>(
        &self,
        task: impl Into<ComponentSelector<'t>>,
        model: impl Into<ComponentSelector<'m>>,
        sources: &ConfigSources,
    ) -> HarnessResult<PreparedRun<'a>> {
        let run = self.compose(task, model, sources)?;
        let config = run.tree.validate()?;
        debug!(stage = ?PipelineStage::Validated, "config validated");
        Ok(PreparedRun {
            task: run.task,
            model: run.model,
            config,
        })
    }

    /// Full run: prepare, construct the instances, and hand them to the
    /// controller's fit. Construction order is model, task, controller.
    pub fn train<'t, 'm>(
        &self,
        task: impl Into<ComponentSelector<'t>>,
        model: impl Into<ComponentSelector<'m>>,
        sources: &ConfigSources,
    ) -> HarnessResult<TrainOutcome> {
        let run = self.prepare(task, model, sources)?;
        let model_instance = ComponentInstance::construct(run.model, &run.config.model);
        let task_instance = ComponentInstance::construct(run.task, &run.config.task);
        let controller = Controller::construct(self.registry.controller(), &run.config.controller);
        debug!(stage = ?PipelineStage::InstancesConstructed, "instances constructed");
        controller.fit(&model_instance, &task_instance);
        Ok(TrainOutcome {
            task: task_instance,
            model: model_instance,
        })
    }
}
