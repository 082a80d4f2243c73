//! Stain area estimator CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use stain_cli::logging::{LogConfig, LogFormat, init_logging};
use stain_cli::report::error_hints;
use stain_cli::settings::Settings;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{AppContext, run_config, run_estimate, run_history, run_sweep};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let ctx = app_context_from_cli(&cli);
    let result = match &cli.command {
        Command::Estimate(args) => run_estimate(args, &ctx),
        Command::Sweep(args) => run_sweep(args, &ctx),
        Command::History(command) => run_history(command, &ctx),
        Command::Config(args) => run_config(args, &ctx),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            for hint in error_hints(&error) {
                eprintln!("  {hint}");
            }
            1
        }
    };
    std::process::exit(exit_code);
}

/// Resolve settings and file locations; flags win over the settings file.
fn app_context_from_cli(cli: &Cli) -> AppContext {
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path);
    let history_path = cli
        .history_file
        .clone()
        .unwrap_or_else(|| settings.history_path());
    AppContext {
        settings,
        config_path,
        history_path,
    }
}

/// Build logging configuration from CLI flags.
///
/// `--log-level` beats `-v`/`-q`, and either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level)
        .with_env_filter(!cli.verbosity.is_present() && cli.log_level.is_none())
        .with_format(format)
        .with_ansi(ansi)
        .with_log_file(cli.log_file.clone())
}
