//! Train Harness Library
//!
//! This module exports the configuration pipeline for testing and
//! integration: component descriptors, schema derivation, layered
//! merging, the compatibility matrix, and the per-invocation pipeline.

pub mod cli;
pub mod component;
pub mod config;
pub mod error;
pub mod matrix;
pub mod models;
pub mod pipeline;
pub mod registry;
pub mod tasks;
pub mod trainer;
