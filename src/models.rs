//! Builtin model components.
//!
//! Descriptors for the external model plugins. The recurrent models pin
//! their canonical names because the naive kebab-casing would split
//! their acronyms letter by letter.

use crate::component::{ComponentSpec, ParamSpec};
use crate::config::FieldType;

/// Vanilla recurrent network.
pub fn lit_rnn() -> ComponentSpec {
    ComponentSpec::new(
        "LitRNN",
        vec![
            ParamSpec::required("vocab_size", FieldType::Int),
            ParamSpec::required("embedding_dim", FieldType::Int),
            ParamSpec::required("hidden_size", FieldType::Int),
            ParamSpec::required("nonlinearity", FieldType::Str),
            ParamSpec::required("dropout", FieldType::Float),
            ParamSpec::required("learn_rate", FieldType::Float),
        ],
    )
    .named("lit-rnn")
}

/// LSTM with a projected hidden state.
pub fn lit_lstm() -> ComponentSpec {
    ComponentSpec::new(
        "LitLSTM",
        vec![
            ParamSpec::required("vocab_size", FieldType::Int),
            ParamSpec::required("embedding_dim", FieldType::Int),
            ParamSpec::required("projection_size", FieldType::Int),
            ParamSpec::required("learn_rate", FieldType::Float),
        ],
    )
    .named("lit-lstm")
}

/// Small convolutional net. Its constructor declares learn_rate as int.
pub fn lit_conv_net() -> ComponentSpec {
    ComponentSpec::new(
        "LitConvNet",
        vec![
            ParamSpec::required("input_size", FieldType::Int),
            ParamSpec::required("output_size", FieldType::Int),
            ParamSpec::required("learn_rate", FieldType::Int),
        ],
    )
}
