//! Builtin task components.
//!
//! Tasks own the data side of a training run. Each function returns the
//! constructor descriptor of one external task plugin; the pipeline
//! derives config schemas from these.

use crate::component::{ComponentSpec, ParamSpec};
use crate::config::FieldType;

/// Plain data module: a data directory plus batching knobs.
pub fn lit_simple_args() -> ComponentSpec {
    ComponentSpec::new(
        "LitSimpleArgs",
        vec![
            ParamSpec::required("datadir", FieldType::Str),
            ParamSpec::required("batch_size", FieldType::Int),
            ParamSpec::required("num_workers", FieldType::Int),
        ],
    )
}

/// Text data module with tokenization, transforms, and a validation split.
pub fn lit_complex_args() -> ComponentSpec {
    ComponentSpec::new(
        "LitComplexArgs",
        vec![
            ParamSpec::required("datadir", FieldType::Str),
            ParamSpec::required("batch_size", FieldType::Int),
            ParamSpec::required("val_size", FieldType::Float),
            ParamSpec::required("tokenizer_name", FieldType::Str),
            ParamSpec::required("transforms", FieldType::StrList),
        ],
    )
}
