//! CLI argument definitions for the stain area estimator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "stain-area",
    version,
    about = "Monte Carlo stain area estimation",
    long_about = "Estimate the area of a bright stain in a binarized image.\n\n\
                  Random points are scattered over the image; the share that lands on\n\
                  bright pixels, scaled by the image area, is the estimate."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the default location.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// History file to use instead of the configured one.
    #[arg(long = "history-file", value_name = "PATH", global = true)]
    pub history_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the stain area of one image.
    Estimate(EstimateArgs),

    /// Re-estimate one image across a range of sample counts.
    Sweep(SweepArgs),

    /// Inspect or edit the calculation history.
    #[command(subcommand)]
    History(HistoryCommand),

    /// Show the effective settings.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct EstimateArgs {
    /// Image file (PNG, JPEG or BMP).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Number of random sample points (default from settings).
    #[arg(long = "points", short = 'n', value_name = "N")]
    pub points: Option<usize>,

    /// Seed for reproducible sampling.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Save the result to the calculation history.
    #[arg(long = "save")]
    pub save: bool,

    /// Write the sample points as JSON for an overlay renderer.
    #[arg(long = "overlay-out", value_name = "PATH")]
    pub overlay_out: Option<PathBuf>,
}

#[derive(Args)]
pub struct SweepArgs {
    /// Image file (PNG, JPEG or BMP).
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// First sample count (default from settings).
    #[arg(long = "from", value_name = "N")]
    pub from: Option<usize>,

    /// Last sample count (default from settings).
    #[arg(long = "to", value_name = "N")]
    pub to: Option<usize>,

    /// Increment between sample counts (default from settings).
    #[arg(long = "step", value_name = "N")]
    pub step: Option<usize>,

    /// Seed for reproducible sampling.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List saved calculations, newest first.
    List,

    /// Show one saved calculation.
    Show {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete one saved calculation.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Delete every saved calculation.
    Clear,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the default settings to the settings file.
    #[arg(long = "write-default")]
    pub write_default: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
