//! apidecl binary entry point.

use apidecl::cli::{Cli, CliError, run};
use apidecl::config::{DEFAULT_LOG_FILTER, Settings};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = Settings::resolve(cli.bundle.clone(), cli.log_level.clone());
    init_tracing(&settings.log_filter);

    match run(&cli, &settings) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let CliError::CheckFailed { report, .. } = &err {
                print!("{}", report);
            }
            error!(%err, "command failed");
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr, command output to stdout.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
