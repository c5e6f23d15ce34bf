//! CLI commands and argument handling.
//!
//! This module contains the clap CLI definitions. Command bodies live in
//! [`commands`].

pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::config::{PanelOverrides, PanelPreset};

/// Result type returned by every command.
pub type CliResult = anyhow::Result<ExitCode>;

/// Run a command inside a transient live panel.
///
/// The panel shows the tail of the command's output while it runs and
/// disappears when it finishes, leaving only a short summary behind.
#[derive(Parser, Debug)]
#[command(name = "tpanel")]
#[command(author, version = crate::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run. Prints usage when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands for tpanel.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command and show its output in a live panel.
    ///
    /// Examples:
    ///   tpanel run -- cargo build
    ///   tpanel run --preset streaming --title Tests -- make test
    ///   tpanel run --set display_lines=10 -- ./deploy.sh
    Run(RunCommand),

    /// Preview the built-in themes.
    Themes(ThemesCommand),

    /// Generate shell completions.
    ///
    /// Outputs completion script to stdout for bash, zsh, or fish.
    Completions(CompletionsCommand),
}

/// Arguments for the 'run' command.
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Panel title. Defaults to the command line.
    #[arg(short = 't', long)]
    pub title: Option<String>,

    /// Configuration preset.
    #[arg(short = 'p', long, value_enum, default_value_t = PanelPreset::Default)]
    pub preset: PanelPreset,

    /// Number of output lines kept in memory.
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Number of output lines shown in the panel.
    #[arg(short = 'd', long)]
    pub display_lines: Option<usize>,

    /// Border style, e.g. "dim", "bold blue" or "#5e81ac".
    #[arg(long)]
    pub border_style: Option<String>,

    /// Panel redraws per second.
    #[arg(long, value_name = "HZ")]
    pub refresh: Option<f64>,

    /// Status text shown before the first update.
    #[arg(long)]
    pub status: Option<String>,

    /// Load panel settings from a TOML file.
    #[arg(short = 'c', long, env = "TPANEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override a panel setting (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Theme for the summary printed after the panel closes.
    #[arg(long, default_value = "default", env = "TPANEL_THEME")]
    pub theme: String,

    /// Command to run, followed by its arguments.
    #[arg(last = true, required = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl RunCommand {
    /// Overrides taken from the panel flags.
    pub fn overrides(&self) -> PanelOverrides {
        PanelOverrides {
            max_lines: self.max_lines,
            display_lines: self.display_lines,
            refresh_per_second: self.refresh,
            animation_rate: None,
            default_status: self.status.clone(),
            border_style: self.border_style.clone(),
        }
    }

    /// The command line as typed, for titles and summaries.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// Execute the run command.
    pub fn execute(&self) -> CliResult {
        commands::run::run(self)
    }
}

/// Arguments for the 'themes' command.
#[derive(Args, Debug)]
pub struct ThemesCommand {
    /// Show only this theme.
    pub name: Option<String>,
}

impl ThemesCommand {
    /// Execute the themes command.
    pub fn execute(&self) -> CliResult {
        commands::themes::themes(self.name.as_deref())?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Arguments for the 'completions' command.
#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for.
    #[arg(value_parser = ["bash", "zsh", "fish"])]
    pub shell: String,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self) -> CliResult {
        commands::completions::completions(&self.shell)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Print the short usage shown when no subcommand is given.
pub fn print_usage() {
    println!("tpanel - run a command inside a transient live panel.");
    println!();
    println!("Run 'tpanel --help' for available commands.");
    println!();
    println!("Quick start:");
    println!("  tpanel run -- cargo build              # Live tail of the build");
    println!("  tpanel run -d 10 -- make test          # Show 10 lines");
    println!("  tpanel run --preset streaming -- ./x   # Longer history");
}

/// Report a command error and turn it into an exit code.
pub fn handle_result(result: CliResult) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {e:#}");
            ExitCode::FAILURE
        }
    }
}
