//! train-harness CLI
//!
//! Binary entry point: parses the command line, wires up logging, and
//! drives the configuration pipeline.

use anyhow::{Result, bail};
use clap::Parser;
use std::fs::OpenOptions;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use train_harness::cli::train::TrainArgs;
use train_harness::cli::{Cli, Command};
use train_harness::config::ConfigSources;
use train_harness::error::HarnessError;
use train_harness::pipeline::Pipeline;
use train_harness::registry::HarnessRegistry;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<HarnessError>()
                .map(HarnessError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;
    match cli.command {
        Command::Train(args) => run_train(args),
    }
}

/// Filter for the log subscriber: `RUST_LOG` when set, otherwise the
/// level implied by `--verbose`.
fn log_filter(verbose: bool) -> EnvFilter {
    let default_directive = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize logging based on the --log option. Logs never share
/// stdout with the pipeline's own output unless asked to.
fn init_logging(cli: &Cli) -> Result<()> {
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(log_filter(cli.verbose))
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(log_filter(cli.verbose))
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(log_filter(cli.verbose))
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn run_train(args: TrainArgs) -> Result<()> {
    let registry = HarnessRegistry::builtin()?;

    if args.compat {
        print!("{}", registry.matrix().render_table());
        return Ok(());
    }

    let Some((task, model)) = args.selection() else {
        // clap enforces this already
        bail!("--task and --model are required");
    };
    let sources = ConfigSources::gather(args.config_file.as_deref(), &args.options)?;
    debug!(task, model, overrides = sources.overrides.len(), "starting train invocation");

    let pipeline = Pipeline::new(&registry);
    if args.print_config {
        // Shown even when fields are missing; validation only gates training.
        let run = pipeline.compose(task, model, &sources)?;
        print!("{}", run.tree.to_yaml());
        return Ok(());
    }

    pipeline.train(task, model, &sources)?;
    Ok(())
}
