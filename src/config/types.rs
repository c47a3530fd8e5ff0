//! Configuration value model.
//!
//! A training run is configured through a three-section tree (task, model,
//! controller). Each section is backed by a derived [`ConfigSchema`] and
//! holds one [`FieldValue`] per declared field. Fields without a value
//! carry the [`MISSING_MARKER`] until a layer or a dispatch fills them in.

use super::schema::ConfigSchema;
use crate::error::{HarnessError, HarnessResult};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;

/// Rendering of an unresolved required field.
pub const MISSING_MARKER: &str = "???";

/// The three sections of a training configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Task,
    Model,
    Controller,
}

impl Section {
    /// All sections in rendering order.
    pub const ALL: [Section; 3] = [Section::Task, Section::Model, Section::Controller];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Task => "task",
            Section::Model => "model",
            Section::Controller => "controller",
        }
    }

    /// Parse a section name. Exact match only.
    pub fn parse(name: &str) -> Option<Section> {
        match name {
            "task" => Some(Section::Task),
            "model" => Some(Section::Model),
            "controller" => Some(Section::Controller),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Str,
    StrList,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Str => "str",
            FieldType::StrList => "list[str]",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration value, or the marker for a required field nobody has
/// supplied yet.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    StrList(Vec<String>),
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Whether this value is acceptable for a field of the given type.
    /// `Missing` is acceptable everywhere.
    pub fn matches(&self, ty: FieldType) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Bool(_) => ty == FieldType::Bool,
            FieldValue::Int(_) => ty == FieldType::Int,
            FieldValue::Float(_) => ty == FieldType::Float,
            FieldValue::Str(_) => ty == FieldType::Str,
            FieldValue::StrList(_) => ty == FieldType::StrList,
        }
    }

    /// Coerce a value from the config file layer to the declared type.
    ///
    /// Widening is allowed (int to float, scalar to str); anything lossy
    /// or ambiguous is rejected. Floats with a fractional part never
    /// coerce to int.
    pub fn coerce_json(
        path: &str,
        ty: FieldType,
        value: &serde_json::Value,
    ) -> HarnessResult<FieldValue> {
        use serde_json::Value;

        let mismatch = || HarnessError::coercion(path, render_json(value), ty);
        match ty {
            FieldType::Bool => match value {
                Value::Bool(b) => Ok(FieldValue::Bool(*b)),
                Value::String(s) => parse_bool(s).map(FieldValue::Bool).ok_or_else(mismatch),
                _ => Err(mismatch()),
            },
            FieldType::Int => match value {
                Value::Number(n) => n.as_i64().map(FieldValue::Int).ok_or_else(mismatch),
                Value::String(s) => {
                    s.trim().parse::<i64>().map(FieldValue::Int).map_err(|_| mismatch())
                }
                _ => Err(mismatch()),
            },
            FieldType::Float => match value {
                Value::Number(n) => n.as_f64().map(FieldValue::Float).ok_or_else(mismatch),
                Value::String(s) => {
                    s.trim().parse::<f64>().map(FieldValue::Float).map_err(|_| mismatch())
                }
                _ => Err(mismatch()),
            },
            FieldType::Str => match value {
                Value::String(s) => Ok(FieldValue::Str(s.clone())),
                Value::Bool(b) => Ok(FieldValue::Str(b.to_string())),
                Value::Number(n) => Ok(FieldValue::Str(n.to_string())),
                _ => Err(mismatch()),
            },
            FieldType::StrList => match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        Value::Bool(b) => Ok(b.to_string()),
                        Value::Number(n) => Ok(n.to_string()),
                        _ => Err(mismatch()),
                    })
                    .collect::<HarnessResult<Vec<String>>>()
                    .map(FieldValue::StrList),
                _ => Err(mismatch()),
            },
        }
    }

    /// Coerce a raw override string to the declared type.
    ///
    /// Lists accept `[a,b,c]` or bare `a,b,c`; an empty string or `[]`
    /// is the empty list.
    pub fn coerce_str(path: &str, ty: FieldType, raw: &str) -> HarnessResult<FieldValue> {
        let mismatch = || HarnessError::coercion(path, raw, ty);
        match ty {
            FieldType::Bool => parse_bool(raw).map(FieldValue::Bool).ok_or_else(mismatch),
            FieldType::Int => {
                raw.trim().parse::<i64>().map(FieldValue::Int).map_err(|_| mismatch())
            }
            FieldType::Float => {
                raw.trim().parse::<f64>().map(FieldValue::Float).map_err(|_| mismatch())
            }
            FieldType::Str => Ok(FieldValue::Str(raw.to_string())),
            FieldType::StrList => {
                let trimmed = raw.trim();
                let inner = trimmed
                    .strip_prefix('[')
                    .and_then(|s| s.strip_suffix(']'))
                    .unwrap_or(trimmed);
                if inner.trim().is_empty() {
                    return Ok(FieldValue::StrList(Vec::new()));
                }
                Ok(FieldValue::StrList(
                    inner.split(',').map(|s| s.trim().to_string()).collect(),
                ))
            }
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Error-message rendering of a JSON value. Strings lose their quotes.
fn render_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => f.write_str(MISSING_MARKER),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::StrList(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing => serializer.serialize_str(MISSING_MARKER),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(x) => serializer.serialize_f64(*x),
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::StrList(items) => items.serialize(serializer),
        }
    }
}

/// One section of the configuration tree: a schema plus one value per
/// declared field, in declaration order.
///
/// The schema is fixed at creation. Writes go through [`set`](Self::set),
/// which rejects undeclared fields and type-mismatched values, so a
/// section can never drift away from its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    section: Section,
    schema: Arc<ConfigSchema>,
    values: Vec<FieldValue>,
}

impl ConfigSection {
    /// Section populated from the schema's defaults. Fields without a
    /// default start as [`FieldValue::Missing`].
    pub fn seeded(section: Section, schema: Arc<ConfigSchema>) -> Self {
        let values = schema.fields().iter().map(|f| f.default.clone()).collect();
        Self {
            section,
            schema,
            values,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn schema(&self) -> &Arc<ConfigSchema> {
        &self.schema
    }

    /// Dotted path for a field of this section, e.g. `task.batch_size`.
    pub fn dotted(&self, field: &str) -> String {
        format!("{}.{}", self.section, field)
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.schema.fields().iter().position(|f| f.name == field)
    }

    fn unknown_field(&self, field: &str) -> HarnessError {
        let declared: Vec<&str> = self.schema.fields().iter().map(|f| f.name.as_str()).collect();
        HarnessError::override_path(
            self.dotted(field),
            format!(
                "section '{}' declares no field '{}' (declared fields: {})",
                self.section,
                field,
                declared.join(", ")
            ),
        )
    }

    /// Declared type of a field, if the schema has it.
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.index_of(field).map(|i| self.schema.fields()[i].ty)
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.index_of(field).map(|i| &self.values[i])
    }

    fn require(&self, field: &str) -> HarnessResult<&FieldValue> {
        match self.get(field) {
            Some(value) => Ok(value),
            None => Err(self.unknown_field(field)),
        }
    }

    pub fn get_bool(&self, field: &str) -> HarnessResult<bool> {
        match self.require(field)? {
            FieldValue::Bool(b) => Ok(*b),
            FieldValue::Missing => Err(HarnessError::missing_fields(vec![self.dotted(field)])),
            other => Err(HarnessError::coercion(
                self.dotted(field),
                other.to_string(),
                FieldType::Bool,
            )),
        }
    }

    pub fn get_int(&self, field: &str) -> HarnessResult<i64> {
        match self.require(field)? {
            FieldValue::Int(i) => Ok(*i),
            FieldValue::Missing => Err(HarnessError::missing_fields(vec![self.dotted(field)])),
            other => Err(HarnessError::coercion(
                self.dotted(field),
                other.to_string(),
                FieldType::Int,
            )),
        }
    }

    pub fn get_float(&self, field: &str) -> HarnessResult<f64> {
        match self.require(field)? {
            FieldValue::Float(x) => Ok(*x),
            FieldValue::Missing => Err(HarnessError::missing_fields(vec![self.dotted(field)])),
            other => Err(HarnessError::coercion(
                self.dotted(field),
                other.to_string(),
                FieldType::Float,
            )),
        }
    }

    pub fn get_str(&self, field: &str) -> HarnessResult<&str> {
        match self.require(field)? {
            FieldValue::Str(s) => Ok(s.as_str()),
            FieldValue::Missing => Err(HarnessError::missing_fields(vec![self.dotted(field)])),
            other => Err(HarnessError::coercion(
                self.dotted(field),
                other.to_string(),
                FieldType::Str,
            )),
        }
    }

    pub fn get_list(&self, field: &str) -> HarnessResult<&[String]> {
        match self.require(field)? {
            FieldValue::StrList(items) => Ok(items.as_slice()),
            FieldValue::Missing => Err(HarnessError::missing_fields(vec![self.dotted(field)])),
            other => Err(HarnessError::coercion(
                self.dotted(field),
                other.to_string(),
                FieldType::StrList,
            )),
        }
    }

    /// Coerce and write a value from the config file layer.
    pub fn apply_json(&mut self, field: &str, value: &serde_json::Value) -> HarnessResult<()> {
        let Some(declared) = self.field_type(field) else {
            return Err(self.unknown_field(field));
        };
        let coerced = FieldValue::coerce_json(&self.dotted(field), declared, value)?;
        self.set(field, coerced)
    }

    /// Coerce and write a raw override string.
    pub fn apply_override(&mut self, field: &str, raw: &str) -> HarnessResult<()> {
        let Some(declared) = self.field_type(field) else {
            return Err(self.unknown_field(field));
        };
        let coerced = FieldValue::coerce_str(&self.dotted(field), declared, raw)?;
        self.set(field, coerced)
    }

    /// Write a field. The field must be declared by the schema and the
    /// value must match its declared type.
    pub fn set(&mut self, field: &str, value: FieldValue) -> HarnessResult<()> {
        let Some(index) = self.index_of(field) else {
            return Err(self.unknown_field(field));
        };
        let declared = self.schema.fields()[index].ty;
        if !value.matches(declared) {
            return Err(HarnessError::coercion(self.dotted(field), value.to_string(), declared));
        }
        self.values[index] = value;
        Ok(())
    }

    /// Field names and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema
            .fields()
            .iter()
            .zip(&self.values)
            .map(|(f, v)| (f.name.as_str(), v))
    }

    /// Dotted paths of fields still unresolved, in declaration order.
    pub fn missing_paths(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, value)| value.is_missing())
            .map(|(name, _)| self.dotted(name))
            .collect()
    }
}

impl Serialize for ConfigSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// The full configuration for one training run, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigTree {
    task: ConfigSection,
    model: ConfigSection,
    controller: ConfigSection,
}

impl ConfigTree {
    /// Tree populated from schema defaults only. This is the bottom
    /// precedence layer of the merge.
    pub fn seeded(
        task: Arc<ConfigSchema>,
        model: Arc<ConfigSchema>,
        controller: Arc<ConfigSchema>,
    ) -> Self {
        Self {
            task: ConfigSection::seeded(Section::Task, task),
            model: ConfigSection::seeded(Section::Model, model),
            controller: ConfigSection::seeded(Section::Controller, controller),
        }
    }

    pub fn section(&self, section: Section) -> &ConfigSection {
        match section {
            Section::Task => &self.task,
            Section::Model => &self.model,
            Section::Controller => &self.controller,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut ConfigSection {
        match section {
            Section::Task => &mut self.task,
            Section::Model => &mut self.model,
            Section::Controller => &mut self.controller,
        }
    }

    /// Split into sections so a dispatch can rewrite task and model.
    pub fn into_sections(self) -> (ConfigSection, ConfigSection, ConfigSection) {
        (self.task, self.model, self.controller)
    }

    pub fn from_sections(
        task: ConfigSection,
        model: ConfigSection,
        controller: ConfigSection,
    ) -> Self {
        debug_assert_eq!(task.section(), Section::Task);
        debug_assert_eq!(model.section(), Section::Model);
        debug_assert_eq!(controller.section(), Section::Controller);
        Self {
            task,
            model,
            controller,
        }
    }

    /// Dotted paths of all unresolved fields across the tree, sorted.
    pub fn missing_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = Section::ALL
            .iter()
            .flat_map(|s| self.section(*s).missing_paths())
            .collect();
        paths.sort();
        paths
    }

    /// Check that every required field has been resolved. Reports all
    /// remaining unresolved paths in a single error.
    pub fn validate(self) -> HarnessResult<ResolvedConfig> {
        let missing = self.missing_paths();
        if !missing.is_empty() {
            return Err(HarnessError::missing_fields(missing));
        }
        Ok(ResolvedConfig {
            task: self.task,
            model: self.model,
            controller: self.controller,
        })
    }

    /// YAML rendering with sections in task, model, controller order.
    /// Unresolved fields render as the missing marker.
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_default()
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sections(&self.task, &self.model, &self.controller, serializer)
    }
}

/// A configuration tree that passed validation: no field is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub task: ConfigSection,
    pub model: ConfigSection,
    pub controller: ConfigSection,
}

impl ResolvedConfig {
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(self).unwrap_or_default()
    }
}

impl Serialize for ResolvedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_sections(&self.task, &self.model, &self.controller, serializer)
    }
}

fn serialize_sections<S: Serializer>(
    task: &ConfigSection,
    model: &ConfigSection,
    controller: &ConfigSection,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(3))?;
    map.serialize_entry(Section::Task.as_str(), task)?;
    map.serialize_entry(Section::Model.as_str(), model)?;
    map.serialize_entry(Section::Controller.as_str(), controller)?;
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{ConfigSchema, SchemaField};

    fn sample_schema() -> Arc<ConfigSchema> {
        Arc::new(ConfigSchema::new(
            "sample",
            vec![
                SchemaField {
                    name: "flag".into(),
                    ty: FieldType::Bool,
                    default: FieldValue::Bool(false),
                },
                SchemaField {
                    name: "count".into(),
                    ty: FieldType::Int,
                    default: FieldValue::Missing,
                },
                SchemaField {
                    name: "rate".into(),
                    ty: FieldType::Float,
                    default: FieldValue::Missing,
                },
                SchemaField {
                    name: "label".into(),
                    ty: FieldType::Str,
                    default: FieldValue::Str("base".into()),
                },
                SchemaField {
                    name: "stages".into(),
                    ty: FieldType::StrList,
                    default: FieldValue::Missing,
                },
            ],
        ))
    }

    fn sample_section() -> ConfigSection {
        ConfigSection::seeded(Section::Task, sample_schema())
    }

    #[test]
    fn seeded_section_uses_schema_defaults() {
        let section = sample_section();
        assert_eq!(section.get("flag"), Some(&FieldValue::Bool(false)));
        assert_eq!(section.get("count"), Some(&FieldValue::Missing));
        assert_eq!(section.get("label"), Some(&FieldValue::Str("base".into())));
    }

    #[test]
    fn set_rejects_undeclared_field() {
        let mut section = sample_section();
        let err = section.set("batchsize", FieldValue::Int(8)).unwrap_err();
        match &err {
            HarnessError::Override { path, reason } => {
                assert_eq!(path, "task.batchsize");
                assert!(reason.contains("declared fields: flag, count, rate, label, stages"));
            }
            other => panic!("expected Override, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn set_rejects_type_mismatch() {
        let mut section = sample_section();
        let err = section.set("count", FieldValue::Str("ten".into())).unwrap_err();
        assert!(matches!(err, HarnessError::TypeCoercion { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn typed_getter_reports_missing_field() {
        let section = sample_section();
        let err = section.get_int("count").unwrap_err();
        assert_eq!(
            err,
            HarnessError::missing_fields(vec!["task.count".into()])
        );
    }

    #[test]
    fn typed_getters_read_set_values() {
        let mut section = sample_section();
        section.set("count", FieldValue::Int(42)).unwrap();
        section.set("rate", FieldValue::Float(0.5)).unwrap();
        section
            .set("stages", FieldValue::StrList(vec!["a".into(), "b".into()]))
            .unwrap();
        assert_eq!(section.get_int("count").unwrap(), 42);
        assert_eq!(section.get_float("rate").unwrap(), 0.5);
        assert_eq!(section.get_str("label").unwrap(), "base");
        assert!(!section.get_bool("flag").unwrap());
        assert_eq!(section.get_list("stages").unwrap(), ["a", "b"]);
    }

    #[test]
    fn coerce_json_accepts_declared_and_widened_values() {
        use serde_json::json;
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::Int, &json!(32)).unwrap(),
            FieldValue::Int(32)
        );
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::Int, &json!("32")).unwrap(),
            FieldValue::Int(32)
        );
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::Float, &json!(3)).unwrap(),
            FieldValue::Float(3.0)
        );
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::Str, &json!(0.5)).unwrap(),
            FieldValue::Str("0.5".into())
        );
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::Bool, &json!("True")).unwrap(),
            FieldValue::Bool(true)
        );
        assert_eq!(
            FieldValue::coerce_json("p", FieldType::StrList, &json!(["a", 1, true])).unwrap(),
            FieldValue::StrList(vec!["a".into(), "1".into(), "true".into()])
        );
    }

    #[test]
    fn coerce_json_rejects_lossy_values() {
        use serde_json::json;
        let err =
            FieldValue::coerce_json("model.vocab_size", FieldType::Int, &json!(3.5)).unwrap_err();
        assert_eq!(
            err,
            HarnessError::coercion("model.vocab_size", "3.5", FieldType::Int)
        );
        assert!(FieldValue::coerce_json("p", FieldType::Bool, &json!(1)).is_err());
        assert!(FieldValue::coerce_json("p", FieldType::StrList, &json!("a,b")).is_err());
    }

    #[test]
    fn coerce_str_parses_scalars_and_lists() {
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::Int, "64").unwrap(),
            FieldValue::Int(64)
        );
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::Float, "1e-3").unwrap(),
            FieldValue::Float(1e-3)
        );
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::Bool, "FALSE").unwrap(),
            FieldValue::Bool(false)
        );
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::StrList, "[crop, flip]").unwrap(),
            FieldValue::StrList(vec!["crop".into(), "flip".into()])
        );
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::StrList, "crop, flip").unwrap(),
            FieldValue::StrList(vec!["crop".into(), "flip".into()])
        );
        assert_eq!(
            FieldValue::coerce_str("p", FieldType::StrList, "[]").unwrap(),
            FieldValue::StrList(Vec::new())
        );
        let err = FieldValue::coerce_str("task.batch_size", FieldType::Int, "many").unwrap_err();
        assert_eq!(err.to_string(), "Cannot coerce 'many' for 'task.batch_size': expected int");
    }

    #[test]
    fn tree_validate_collects_all_missing_paths_sorted() {
        let tree = ConfigTree::seeded(sample_schema(), sample_schema(), sample_schema());
        let err = tree.validate().unwrap_err();
        assert_eq!(
            err,
            HarnessError::missing_fields(vec![
                "controller.count".into(),
                "controller.rate".into(),
                "controller.stages".into(),
                "model.count".into(),
                "model.rate".into(),
                "model.stages".into(),
                "task.count".into(),
                "task.rate".into(),
                "task.stages".into(),
            ])
        );
    }

    #[test]
    fn yaml_rendering_keeps_section_order_and_missing_marker() {
        let tree = ConfigTree::seeded(sample_schema(), sample_schema(), sample_schema());
        let yaml = tree.to_yaml();
        let task_at = yaml.find("task:").unwrap();
        let model_at = yaml.find("model:").unwrap();
        let controller_at = yaml.find("controller:").unwrap();
        assert!(task_at < model_at && model_at < controller_at);
        assert!(yaml.contains("count: ???"));
        assert!(yaml.contains("label: base"));
        assert!(yaml.contains("flag: false"));
    }
}
