//! Task/model compatibility matrix.
//!
//! A pair of components is trainable only if someone registered it
//! here. Each entry carries a dispatch function that gets a final say
//! over the merged task and model sections before construction; pairs
//! that need no adjustment share the [`identity`] dispatch.

use crate::config::ConfigSection;
use crate::error::{HarnessError, HarnessResult};
use std::collections::BTreeMap;
use std::ptr;

/// Pair-specific adjustment applied to the merged task and model
/// sections. Plain `fn` pointers keep dispatches stateless: everything
/// they decide has to come from the two sections.
pub type Dispatch =
    fn(ConfigSection, ConfigSection) -> HarnessResult<(ConfigSection, ConfigSection)>;

/// The shared "no adjustment" dispatch.
pub fn identity(
    task: ConfigSection,
    model: ConfigSection,
) -> HarnessResult<(ConfigSection, ConfigSection)> {
    Ok((task, model))
}

/// Whether a dispatch is the shared [`identity`] function. Reporting
/// uses this to tell plain compatibility entries from custom ones.
pub fn is_identity(dispatch: Dispatch) -> bool {
    ptr::fn_addr_eq(dispatch, identity as Dispatch)
}

/// Registry of trainable (task, model) pairs, keyed by canonical names.
#[derive(Debug, Default)]
pub struct CompatibilityMatrix {
    entries: BTreeMap<(String, String), Dispatch>,
}

impl CompatibilityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair with no config adjustment.
    pub fn register(&mut self, task: &str, model: &str) {
        self.register_with(task, model, identity);
    }

    /// Register a pair with a custom dispatch. Registering the same
    /// pair again replaces its dispatch; the last write wins.
    pub fn register_with(&mut self, task: &str, model: &str, dispatch: Dispatch) {
        self.entries.insert((task.to_string(), model.to_string()), dispatch);
    }

    /// Look up the dispatch for a pair. An unregistered pair is a hard
    /// error; it never falls back to the identity dispatch.
    pub fn lookup(&self, task: &str, model: &str) -> HarnessResult<Dispatch> {
        self.entries
            .get(&(task.to_string(), model.to_string()))
            .copied()
            .ok_or_else(|| HarnessError::incompatible_pair(task, model))
    }

    pub fn contains(&self, task: &str, model: &str) -> bool {
        self.entries.contains_key(&(task.to_string(), model.to_string()))
    }

    /// Distinct task names with at least one registered pair, sorted.
    pub fn task_names(&self) -> Vec<String> {
        // Keys iterate ordered by task, so consecutive dedup is enough.
        let mut names: Vec<String> = self.entries.keys().map(|(task, _)| task.clone()).collect();
        names.dedup();
        names
    }

    /// Distinct model names with at least one registered pair, sorted.
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().map(|(_, model)| model.clone()).collect();
        names.sort();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain-text compatibility table: tasks as rows, models as
    /// columns, cells showing `identity`, `custom`, or `-`.
    pub fn render_table(&self) -> String {
        let tasks = self.task_names();
        let models = self.model_names();
        let task_width = tasks.iter().map(|t| t.len()).chain(["task".len()]).max().unwrap_or(0);
        let col_widths: Vec<usize> = models.iter().map(|m| m.len().max("identity".len())).collect();

        let mut out = String::new();
        let mut header = format!("{:<task_width$}", "task");
        for (model, width) in models.iter().zip(&col_widths) {
            let width = *width;
            header.push_str(&format!("  {model:<width$}"));
        }
        out.push_str(header.trim_end());
        out.push('\n');

        for task in &tasks {
            let mut row = format!("{task:<task_width$}");
            for (model, width) in models.iter().zip(&col_widths) {
                let width = *width;
                let cell = match self.entries.get(&(task.clone(), model.clone())) {
                    Some(dispatch) if is_identity(*dispatch) => "identity",
                    Some(_) => "custom",
                    None => "-",
                };
                row.push_str(&format!("  {cell:<width$}"));
            }
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }
}
