//! Config-source acquisition.
//!
//! Turns the outside world (a YAML file, repeated `-o` flags) into the
//! in-memory layers the merger consumes. File handling stays out here:
//! the merge itself never touches the filesystem.

use crate::error::{HarnessError, HarnessResult};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Config file consulted when none is given explicitly. Only used if it
/// exists; an explicitly passed path must be readable.
pub const DEFAULT_CONFIG_PATH: &str = "conf/conf.yaml";

/// The two externally supplied layers of one invocation, ready for the
/// merger. Paths are dotted (`section.field`); override order is the
/// command-line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSources {
    pub file: Vec<(String, Value)>,
    pub overrides: Vec<(String, String)>,
}

impl ConfigSources {
    /// Gather the layers for one invocation.
    pub fn gather(config_file: Option<&Path>, raw_overrides: &[String]) -> Result<Self> {
        let file = match config_file {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                load_file_layer(path)?
            }
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_PATH);
                if fallback.exists() {
                    debug!(path = DEFAULT_CONFIG_PATH, "loading default config file");
                    load_file_layer(fallback)?
                } else {
                    Vec::new()
                }
            }
        };
        let overrides = parse_overrides(raw_overrides)?;
        Ok(Self { file, overrides })
    }
}

/// Read a YAML config file and flatten it to dotted paths.
///
/// The file must be a mapping of section names to field mappings. An
/// empty or null file is an empty layer. Whether the section and field
/// names actually exist is the merger's call, not ours.
pub fn load_file_layer(path: &Path) -> Result<Vec<(String, Value)>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let root: Option<Value> = serde_yaml::from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    flatten_file_layer(root.unwrap_or(Value::Null))
}

fn flatten_file_layer(root: Value) -> Result<Vec<(String, Value)>> {
    let sections = match root {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        _ => bail!("config file root must be a mapping of sections"),
    };
    let mut layer = Vec::new();
    for (section, body) in sections {
        let fields = match body {
            Value::Object(map) => map,
            Value::Null => continue,
            _ => bail!("config section '{}' must be a mapping of fields", section),
        };
        for (field, value) in fields {
            layer.push((format!("{section}.{field}"), value));
        }
    }
    Ok(layer)
}

/// Parse raw `section.field=value` strings, preserving order.
///
/// Only the shape is checked here. Path and value validation happen in
/// the merge, where the schemas are known.
pub fn parse_overrides(raw: &[String]) -> HarnessResult<Vec<(String, String)>> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((path, value)) => Ok((path.trim().to_string(), value.to_string())),
            None => Err(HarnessError::override_path(
                entry,
                "expected 'section.field=value'",
            )),
        })
        .collect()
}
