//! Train subcommand for the harness CLI
//!
//! Selects a (task, model) pair, layers the configuration, and runs the
//! trainer. `--print-config` and `--compat` are inspection modes that
//! stop before construction.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the train subcommand
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Task identifier (canonical component name)
    #[arg(long, value_name = "NAME", required_unless_present = "compat")]
    pub task: Option<String>,

    /// Model identifier (canonical component name)
    #[arg(long, value_name = "NAME", required_unless_present = "compat")]
    pub model: Option<String>,

    /// Path to the YAML config file (default: conf/conf.yaml when present)
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Set one config field, e.g. -o task.batch_size=64 (repeatable, later wins)
    #[arg(short = 'o', long = "option", value_name = "PATH=VALUE")]
    pub options: Vec<String>,

    /// Print the config as YAML instead of training. Fields still
    /// unresolved after merge and dispatch show as ???
    #[arg(long)]
    pub print_config: bool,

    /// Print the task/model compatibility table and exit
    #[arg(long)]
    pub compat: bool,
}

impl TrainArgs {
    /// The selected pair, when a run (rather than `--compat`) was asked
    /// for. clap guarantees both are present in that case.
    pub fn selection(&self) -> Option<(&str, &str)> {
        match (self.task.as_deref(), self.model.as_deref()) {
            (Some(task), Some(model)) => Some((task, model)),
            _ => None,
        }
    }
}
