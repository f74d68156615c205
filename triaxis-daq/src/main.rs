use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use triaxis_daq::errors::EXIT_RESOURCE;
use triaxis_daq::Cli;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (config, warnings) = Cli::parse().resolve();
    for warning in &warnings {
        warn!("{warning}; using default");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to start runtime: {e}");
            return ExitCode::from(EXIT_RESOURCE);
        }
    };

    match runtime.block_on(triaxis_daq::run(&config)) {
        Ok(report) => ExitCode::from(report.exit_code()),
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
