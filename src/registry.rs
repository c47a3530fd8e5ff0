//! Startup-phase component registration.
//!
//! Everything pluggable is registered here once at startup: task and
//! model descriptors, the controller, and the compatibility matrix.
//! After startup the registry is read-only; the per-invocation pipeline
//! borrows it.

use crate::component::{ComponentSet, ComponentSpec};
use crate::config::{ConfigSection, FieldType, FieldValue};
use crate::error::{HarnessError, HarnessResult};
use crate::matrix::{CompatibilityMatrix, Dispatch, identity};
use crate::{models, tasks, trainer};
use anyhow::{Result, bail};
use tracing::debug;

/// All components known to the harness, plus the pair matrix.
#[derive(Debug)]
pub struct HarnessRegistry {
    tasks: ComponentSet,
    models: ComponentSet,
    controller: ComponentSpec,
    matrix: CompatibilityMatrix,
}

impl HarnessRegistry {
    /// Empty registry with the given controller descriptor.
    pub fn new(controller: ComponentSpec) -> Result<Self> {
        controller.validate()?;
        Ok(Self {
            tasks: ComponentSet::new("task"),
            models: ComponentSet::new("model"),
            controller,
            matrix: CompatibilityMatrix::new(),
        })
    }

    /// The builtin catalog: two tasks, three models, and the four
    /// trainable pairs.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new(trainer::spec())?;
        registry.register_task(tasks::lit_simple_args())?;
        registry.register_task(tasks::lit_complex_args())?;
        registry.register_model(models::lit_rnn())?;
        registry.register_model(models::lit_lstm())?;
        registry.register_model(models::lit_conv_net())?;
        registry.register_pair("lit-simple-args", "lit-rnn")?;
        registry.register_pair("lit-simple-args", "lit-lstm")?;
        registry.register_pair("lit-complex-args", "lit-conv-net")?;
        registry.register_pair_with("lit-complex-args", "lit-lstm", custom_lstm_init)?;
        Ok(registry)
    }

    pub fn register_task(&mut self, spec: ComponentSpec) -> Result<()> {
        self.assert_unique(&spec.canonical_name())?;
        self.tasks.register(spec)
    }

    pub fn register_model(&mut self, spec: ComponentSpec) -> Result<()> {
        self.assert_unique(&spec.canonical_name())?;
        self.models.register(spec)
    }

    // Canonical names key the schema cache, so they must be unique
    // across tasks, models, and the controller, not just within a set.
    fn assert_unique(&self, canonical: &str) -> Result<()> {
        if self.tasks.contains(canonical)
            || self.models.contains(canonical)
            || self.controller.canonical_name() == canonical
        {
            bail!("canonical name '{}' is already registered", canonical);
        }
        Ok(())
    }

    /// Register a trainable pair with the identity dispatch.
    pub fn register_pair(&mut self, task: &str, model: &str) -> Result<()> {
        self.register_pair_with(task, model, identity)
    }

    /// Register a trainable pair with a custom dispatch. Both names
    /// must resolve to registered components.
    pub fn register_pair_with(
        &mut self,
        task: &str,
        model: &str,
        dispatch: Dispatch,
    ) -> Result<()> {
        self.tasks.resolve(task)?;
        self.models.resolve(model)?;
        self.matrix.register_with(task, model, dispatch);
        debug!(task, model, "registered compatibility pair");
        Ok(())
    }

    pub fn tasks(&self) -> &ComponentSet {
        &self.tasks
    }

    pub fn models(&self) -> &ComponentSet {
        &self.models
    }

    pub fn controller(&self) -> &ComponentSpec {
        &self.controller
    }

    pub fn matrix(&self) -> &CompatibilityMatrix {
        &self.matrix
    }
}

/// Pair-specific initialization for complex text data feeding the LSTM:
/// the tokenizer is pinned and the vocabulary scales with the batch size.
fn custom_lstm_init(
    mut task: ConfigSection,
    mut model: ConfigSection,
) -> HarnessResult<(ConfigSection, ConfigSection)> {
    let batch_size = task.get_int("batch_size")?;
    task.set("tokenizer_name", FieldValue::Str("custom-tokenizer-name".into()))?;
    let vocab_size = batch_size.checked_mul(5).ok_or_else(|| {
        HarnessError::coercion("model.vocab_size", format!("5 * {batch_size}"), FieldType::Int)
    })?;
    model.set("vocab_size", FieldValue::Int(vocab_size))?;
    Ok((task, model))
}
