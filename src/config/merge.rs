//! Layered configuration merge.
//!
//! Strict precedence, lowest to highest:
//! 1. schema defaults, read off the component constructors
//! 2. config file layer
//! 3. CLI override layer
//!
//! Within the override layer, later entries win over earlier ones.
//! The merge never invents structure: every dotted path must name a
//! declared field of the matching section, and every value must coerce
//! to the field's declared type.

use super::types::{ConfigTree, Section};
use crate::error::{HarnessError, HarnessResult};
use serde_json::Value;

/// Apply the file and override layers on top of the defaults tree.
///
/// `defaults` is the schema-default layer, usually from
/// [`ConfigTree::seeded`]. Merging is pure: the same three inputs
/// always produce the same tree.
///
/// - A null in the file layer means "not specified"; the lower layer's
///   value is preserved
/// - Paths that name no declared section or field fail with an override
///   error rather than creating anything
/// - Values that cannot be coerced to the declared field type fail with
///   a coercion error
pub fn merge(
    defaults: ConfigTree,
    file_layer: &[(String, Value)],
    override_layer: &[(String, String)],
) -> HarnessResult<ConfigTree> {
    let mut tree = defaults;

    for (path, value) in file_layer {
        if value.is_null() {
            continue;
        }
        let (section, field) = split_path(path)?;
        tree.section_mut(section).apply_json(field, value)?;
    }

    for (path, raw) in override_layer {
        let (section, field) = split_path(path)?;
        tree.section_mut(section).apply_override(field, raw)?;
    }

    Ok(tree)
}

/// Split a dotted path into its section and field parts.
fn split_path(path: &str) -> HarnessResult<(Section, &str)> {
    let Some((section_name, field)) = path.split_once('.') else {
        return Err(HarnessError::override_path(path, "expected 'section.field'"));
    };
    let Some(section) = Section::parse(section_name) else {
        return Err(HarnessError::override_path(
            path,
            format!("unknown section '{section_name}' (sections: task, model, controller)"),
        ));
    };
    Ok((section, field))
}
