//! Command-line interface for term-launch.
//!
//! The tool's own flags come first; the terminal options to digest follow a
//! `--`, exactly as a terminal launcher would receive them:
//!
//! ```text
//! term-launch --format json -- --window --title Logs --tab -- tail -f log
//! ```

use crate::options::{TerminalOptions, help_text};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// term-launch - Turn terminal launcher options into a window and tab plan
#[derive(Parser)]
#[command(name = "term-launch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for the resulting plan
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Profiles file to resolve profile names against (overrides config)
    #[arg(long, value_name = "PATH")]
    pub profiles: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,

    /// Build the plan from a saved session file instead of options
    #[arg(long, value_name = "FILE", conflicts_with = "terminal_args")]
    pub restore: Option<PathBuf>,

    /// List the terminal options understood after `--` and exit
    #[arg(long)]
    pub list_options: bool,

    /// Terminal options to digest
    #[arg(last = true, value_name = "TERMINAL OPTIONS")]
    pub terminal_args: Vec<String>,
}

/// Output format for the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Run options passed from the CLI to `main`
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub profiles: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub log_level: Option<log::LevelFilter>,
    pub restore: Option<PathBuf>,
    pub terminal_args: Vec<String>,
}

/// Result of CLI processing
pub enum CliResult {
    /// Go on and build the plan
    Continue(RunOptions),
    /// Exit with the given code (informational flag handled)
    Exit(i32),
}

/// Process CLI arguments and handle informational flags
pub fn process_cli() -> CliResult {
    cli_result(Cli::parse())
}

fn cli_result(cli: Cli) -> CliResult {
    if cli.list_options {
        print!("{}", help_text());
        return CliResult::Exit(0);
    }

    CliResult::Continue(RunOptions {
        format: cli.format,
        profiles: cli.profiles,
        config: cli.config,
        log_level: cli.log_level.map(LogLevelArg::to_level_filter),
        restore: cli.restore,
        terminal_args: cli.terminal_args,
    })
}

/// Render a finished plan in the requested format
pub fn render(options: &TerminalOptions, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml_ng::to_string(options)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(options)?;
            json.push('\n');
            json
        }
    })
}
