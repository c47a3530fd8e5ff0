//! Configuration derivation and layered merge.
//!
//! A training run's configuration is assembled in three steps:
//! 1. **Derive** - each component's schema is read off its constructor
//!    descriptor ([`schema::derive`]), memoized per component
//! 2. **Merge** - schema defaults, the config file, and CLI overrides
//!    are layered with strict precedence ([`merge::merge`])
//! 3. **Validate** - after dispatch has run, any field still carrying
//!    the missing marker fails the run ([`ConfigTree::validate`])
//!
//! ## Merge strategy
//! - Dotted paths (`section.field`) address exactly one declared field;
//!   unknown sections or fields are errors, never created
//! - Values are coerced to the declared field type; widening only
//! - A null in the file layer means "not specified" and keeps the
//!   lower layer's value

pub mod loader;
pub mod merge;
pub mod schema;
pub mod types;

pub use loader::{ConfigSources, DEFAULT_CONFIG_PATH};
pub use merge::merge;
pub use schema::{ConfigSchema, SchemaField};
pub use types::*;
