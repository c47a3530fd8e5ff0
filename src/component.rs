//! Component descriptors and candidate-set lookup.
//!
//! Tasks, models, and the controller are external plugins as far as the
//! pipeline is concerned. Each one registers a [`ComponentSpec`]
//! describing its constructor; everything else (schema derivation,
//! merging, construction) works off that descriptor.

use crate::config::{ConfigSection, FieldType, FieldValue};
use crate::error::{HarnessError, HarnessResult};
use anyhow::{Result, bail};
use tracing::debug;

/// One constructor parameter of a component.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub ty: FieldType,
    /// `None` for parameters the caller must supply.
    pub default: Option<FieldValue>,
}

impl ParamSpec {
    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            default: None,
        }
    }

    pub fn with_default(name: &'static str, ty: FieldType, default: FieldValue) -> Self {
        Self {
            name,
            ty,
            default: Some(default),
        }
    }
}

/// Naive CamelCase to kebab-case: a separator goes before every
/// upper-case letter except the first. Acronyms come out letter by
/// letter (HTTP becomes h-t-t-p), so components with acronym names
/// should declare an explicit canonical name instead.
pub fn kebab_case(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len() + 4);
    for (i, ch) in type_name.chars().enumerate() {
        if ch.is_ascii_uppercase() && i != 0 {
            out.push('-');
        }
        out.push(ch.to_ascii_lowercase());
    }
    out
}

/// Registration-time descriptor for a pluggable component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    type_name: &'static str,
    name_override: Option<&'static str>,
    params: Vec<ParamSpec>,
    catch_all: bool,
}

impl ComponentSpec {
    /// Descriptor for a component type. Parameters are the constructor's,
    /// in declaration order, excluding any receiver.
    pub fn new(type_name: &'static str, params: Vec<ParamSpec>) -> Self {
        Self {
            type_name,
            name_override: None,
            params,
            catch_all: false,
        }
    }

    /// Pin the canonical name instead of deriving it from the type name.
    pub fn named(mut self, canonical: &'static str) -> Self {
        self.name_override = Some(canonical);
        self
    }

    /// Mark the constructor as taking a variadic catch-all parameter.
    /// Such components cannot participate: their schema is open-ended.
    pub fn with_catch_all(mut self) -> Self {
        self.catch_all = true;
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn has_catch_all(&self) -> bool {
        self.catch_all
    }

    /// Canonical name: the explicit override when present, otherwise the
    /// kebab-cased type name.
    pub fn canonical_name(&self) -> String {
        match self.name_override {
            Some(name) => name.to_string(),
            None => kebab_case(self.type_name),
        }
    }

    /// Registration-time checks shared by every component slot.
    pub fn validate(&self) -> Result<()> {
        if self.catch_all {
            bail!(
                "component '{}' declares a catch-all constructor parameter; its config schema cannot be derived",
                self.type_name
            );
        }
        Ok(())
    }
}

/// Selector for a component: an external identifier string, or a
/// descriptor reference that is already resolved.
#[derive(Debug, Clone, Copy)]
pub enum ComponentSelector<'a> {
    Id(&'a str),
    Spec(&'a ComponentSpec),
}

impl<'a> From<&'a str> for ComponentSelector<'a> {
    fn from(id: &'a str) -> Self {
        ComponentSelector::Id(id)
    }
}

impl<'a> From<&'a ComponentSpec> for ComponentSelector<'a> {
    fn from(spec: &'a ComponentSpec) -> Self {
        ComponentSelector::Spec(spec)
    }
}

/// An ordered set of component descriptors sharing a role ("task" or
/// "model"). Lookups resolve against this set only.
#[derive(Debug, Clone)]
pub struct ComponentSet {
    role: &'static str,
    specs: Vec<ComponentSpec>,
}

impl ComponentSet {
    pub fn new(role: &'static str) -> Self {
        Self {
            role,
            specs: Vec::new(),
        }
    }

    pub fn role(&self) -> &'static str {
        self.role
    }

    /// Add a descriptor to the set. Canonical names must be unique
    /// within the set, and catch-all constructors are rejected.
    pub fn register(&mut self, spec: ComponentSpec) -> Result<()> {
        spec.validate()?;
        let canonical = spec.canonical_name();
        if self.contains(&canonical) {
            bail!("duplicate {} canonical name '{}'", self.role, canonical);
        }
        debug!(role = self.role, component = %canonical, "registered component");
        self.specs.push(spec);
        Ok(())
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.specs.iter().any(|spec| spec.canonical_name() == canonical)
    }

    /// Resolve a selector against this set.
    ///
    /// A descriptor reference that is a member of the set passes through
    /// unchanged. Anything else is matched by canonical name, exactly;
    /// no match is an [`HarnessError::UnknownComponent`].
    pub fn resolve<'a, 's>(
        &'a self,
        selector: impl Into<ComponentSelector<'s>>,
    ) -> HarnessResult<&'a ComponentSpec> {
        match selector.into() {
            ComponentSelector::Spec(spec) => {
                if let Some(member) = self.specs.iter().find(|member| std::ptr::eq(*member, spec)) {
                    return Ok(member);
                }
                self.find_named(&spec.canonical_name())
            }
            ComponentSelector::Id(id) => self.find_named(id),
        }
    }

    fn find_named(&self, id: &str) -> HarnessResult<&ComponentSpec> {
        self.specs
            .iter()
            .find(|spec| spec.canonical_name() == id)
            .ok_or_else(|| HarnessError::unknown_component(self.role, id, self.canonical_names()))
    }

    /// Canonical names in registration order.
    pub fn canonical_names(&self) -> Vec<String> {
        self.specs.iter().map(|spec| spec.canonical_name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentSpec> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// A constructed component. The real training stack would hold a live
/// object here; the harness records the call and its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInstance {
    type_name: String,
    args: Vec<(String, FieldValue)>,
}

impl ComponentInstance {
    /// Stand-in for the external factory: echoes the constructor call on
    /// stdout and captures the arguments.
    pub fn construct(spec: &ComponentSpec, section: &ConfigSection) -> Self {
        debug_assert_eq!(spec.canonical_name(), section.schema().component());
        let args: Vec<(String, FieldValue)> = section
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        let instance = Self {
            type_name: spec.type_name().to_string(),
            args,
        };
        debug!(component = instance.type_name.as_str(), "constructing component");
        println!("called constructor of {} with {}", instance.type_name, instance.render_args());
        instance
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn args(&self) -> &[(String, FieldValue)] {
        &self.args
    }

    fn render_args(&self) -> String {
        let parts: Vec<String> = self
            .args
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ComponentSet {
        let mut set = ComponentSet::new("model");
        set.register(ComponentSpec::new(
            "LitConvNet",
            vec![ParamSpec::required("input_size", FieldType::Int)],
        ))
        .unwrap();
        set.register(
            ComponentSpec::new("LitLSTM", vec![ParamSpec::required("vocab_size", FieldType::Int)])
                .named("lit-lstm"),
        )
        .unwrap();
        set
    }

    #[test]
    fn kebab_case_splits_every_word() {
        assert_eq!(kebab_case("LitConvNet"), "lit-conv-net");
        assert_eq!(kebab_case("Trainer"), "trainer");
    }

    #[test]
    fn kebab_case_splits_acronyms_letter_by_letter() {
        assert_eq!(kebab_case("LitRNN"), "lit-r-n-n");
        assert_eq!(kebab_case("HTTPServer"), "h-t-t-p-server");
    }

    #[test]
    fn canonical_name_prefers_explicit_override() {
        let spec = ComponentSpec::new("LitLSTM", vec![]).named("lit-lstm");
        assert_eq!(spec.canonical_name(), "lit-lstm");
        let derived = ComponentSpec::new("LitLSTM", vec![]);
        assert_eq!(derived.canonical_name(), "lit-l-s-t-m");
    }

    #[test]
    fn resolve_passes_member_reference_through() {
        let set = sample_set();
        let member = set.iter().next().unwrap();
        let resolved = set.resolve(member).unwrap();
        assert!(std::ptr::eq(resolved, member));
    }

    #[test]
    fn resolve_matches_canonical_name_exactly() {
        let set = sample_set();
        assert_eq!(set.resolve("lit-conv-net").unwrap().type_name(), "LitConvNet");
        assert_eq!(set.resolve("lit-lstm").unwrap().type_name(), "LitLSTM");
        assert!(set.resolve("LitConvNet").is_err());
        assert!(set.resolve("lit-conv-net ").is_err());
    }

    #[test]
    fn resolve_unknown_reports_role_and_candidates() {
        let set = sample_set();
        assert_eq!(set.role(), "model");
        let err = set.resolve("lit-gru").unwrap_err();
        assert_eq!(
            err,
            HarnessError::unknown_component("model", "lit-gru", vec![
                "lit-conv-net".into(),
                "lit-lstm".into(),
            ])
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn a_new_set_is_empty() {
        assert!(ComponentSet::new("task").is_empty());
        assert!(!sample_set().is_empty());
    }

    #[test]
    fn register_rejects_duplicates_and_catch_all() {
        let mut set = sample_set();
        let duplicate = ComponentSpec::new("LitConvNet", vec![]);
        assert!(set.register(duplicate).is_err());

        let variadic = ComponentSpec::new("LitAnything", vec![]).with_catch_all();
        assert!(variadic.has_catch_all());
        let err = set.register(variadic).unwrap_err();
        assert!(err.to_string().contains("catch-all"));

        // Failed registrations leave the set untouched.
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn construct_captures_arguments_in_order() {
        use crate::config::{Section, schema};

        let spec = ComponentSpec::new(
            "EchoUnit",
            vec![
                ParamSpec::with_default("first", FieldType::Int, FieldValue::Int(1)),
                ParamSpec::with_default("second", FieldType::Str, FieldValue::Str("two".into())),
            ],
        );
        let section = ConfigSection::seeded(Section::Model, schema::derive(&spec));
        let instance = ComponentInstance::construct(&spec, &section);
        assert_eq!(instance.type_name(), "EchoUnit");
        assert_eq!(
            instance.args(),
            [
                ("first".to_string(), FieldValue::Int(1)),
                ("second".to_string(), FieldValue::Str("two".into())),
            ]
        );
    }
}
