//! Schema derivation from component descriptors.
//!
//! A component's config schema is read off its constructor descriptor:
//! one field per declared parameter, in declaration order, with the
//! parameter's default carried over when it has one. Derivation is
//! memoized per component for the life of the process, so every caller
//! asking about the same component sees the same [`ConfigSchema`]
//! allocation.

use super::types::{FieldType, FieldValue};
use crate::component::ComponentSpec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// One constructible field of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub ty: FieldType,
    /// [`FieldValue::Missing`] when the constructor declares no default.
    pub default: FieldValue,
}

/// Derived description of everything a component's constructor accepts.
#[derive(Debug, PartialEq)]
pub struct ConfigSchema {
    component: String,
    fields: Vec<SchemaField>,
}

impl ConfigSchema {
    pub(crate) fn new(component: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            component: component.into(),
            fields,
        }
    }

    /// Canonical name of the component this schema was derived from.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Fields in constructor declaration order.
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn cache() -> &'static Mutex<HashMap<String, Arc<ConfigSchema>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Arc<ConfigSchema>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Derive the config schema for a component.
///
/// The first call for a component computes and caches the schema; later
/// calls return the cached `Arc`, so two derivations of the same
/// component compare equal with [`Arc::ptr_eq`]. Check and insert happen
/// under one lock, so concurrent first calls still agree on a single
/// allocation.
pub fn derive(spec: &ComponentSpec) -> Arc<ConfigSchema> {
    let key = spec.canonical_name();
    let mut cache = cache().lock().unwrap();
    if let Some(cached) = cache.get(&key) {
        return Arc::clone(cached);
    }
    let schema = Arc::new(compute(spec));
    cache.insert(key, Arc::clone(&schema));
    schema
}

fn compute(spec: &ComponentSpec) -> ConfigSchema {
    let fields = spec
        .params()
        .iter()
        .map(|param| SchemaField {
            name: param.name.to_string(),
            ty: param.ty,
            default: param.default.clone().unwrap_or(FieldValue::Missing),
        })
        .collect();
    ConfigSchema::new(spec.canonical_name(), fields)
}
