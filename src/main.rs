//! tpanel - run a command inside a transient live panel.
//!
//! This is the main entry point for the tpanel CLI tool.

use clap::Parser;
use tpanel::cli::{handle_result, print_usage, Cli, CliResult, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_env("TPANEL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> std::process::ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result: CliResult = match cli.command {
        None => {
            print_usage();
            Ok(std::process::ExitCode::SUCCESS)
        }
        Some(cmd) => match cmd {
            Commands::Run(c) => c.execute(),
            Commands::Themes(c) => c.execute(),
            Commands::Completions(c) => c.execute(),
        },
    };

    handle_result(result)
}
