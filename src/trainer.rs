//! The training controller.
//!
//! One fixed controller drives every run. Its config section is derived
//! and merged exactly like the task and model sections, but it takes no
//! part in compatibility dispatch.

use crate::component::{ComponentInstance, ComponentSpec, ParamSpec};
use crate::config::{ConfigSection, FieldType};
use tracing::info;

/// Constructor descriptor of the external trainer collaborator.
pub fn spec() -> ComponentSpec {
    ComponentSpec::new(
        "Trainer",
        vec![
            ParamSpec::required("max_epochs", FieldType::Int),
            ParamSpec::required("patience", FieldType::Int),
            ParamSpec::required("seed", FieldType::Int),
            ParamSpec::required("experiment", FieldType::Str),
            ParamSpec::required("deterministic", FieldType::Bool),
        ],
    )
}

/// Constructed controller. Holds the instance stub and hands the task
/// and model instances to the training loop.
#[derive(Debug)]
pub struct Controller {
    instance: ComponentInstance,
}

impl Controller {
    pub fn construct(spec: &ComponentSpec, section: &ConfigSection) -> Self {
        Self {
            instance: ComponentInstance::construct(spec, section),
        }
    }

    /// Entry point of the training loop stub.
    pub fn fit(&self, model: &ComponentInstance, task: &ComponentInstance) {
        info!(model = model.type_name(), task = task.type_name(), "starting fit");
        println!(
            "called fit of {} with model {} and task {}",
            self.instance.type_name(),
            model.type_name(),
            task.type_name()
        );
    }
}
