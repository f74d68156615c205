//! Triaxis acquisition application
//!
//! Wires the `triaxis-core` session to the outside world:
//!
//! - [`config`]: CLI flags, environment, mode profiles
//! - [`source`]: simulated sensor
//! - [`sink`]: CSV sample log
//! - [`console`]: operator output on stdout
//! - [`runner`]: the timer-driven acquisition loop with Ctrl-C handling
//!
//! ```no_run
//! use triaxis_daq::{run, DaqConfig};
//!
//! # async fn demo() -> triaxis_daq::errors::Result<()> {
//! let config = DaqConfig::default().with_max_samples(20);
//! let report = run(&config).await?;
//! println!("{} samples, {} alerts", report.ticks, report.alerts);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod errors;
pub mod runner;
pub mod sink;
pub mod source;

pub use config::{Cli, DaqConfig, Mode};
pub use console::Console;
pub use errors::{DaqError, Result};
pub use runner::{RunReport, Runner, StopReason};
pub use sink::CsvSampleLog;
pub use source::SimulatedSensor;

use tokio_util::sync::CancellationToken;
use tracing::info;
use triaxis_core::time::SystemClock;
use triaxis_core::Session;

/// Run one acquisition session with the simulated sensor
///
/// Allocates the session, opens the log file, then samples until Ctrl-C,
/// `max_samples`, or the session limit. Startup failures are returned as
/// errors; everything after the first tick ends in a [`RunReport`].
pub async fn run(config: &DaqConfig) -> Result<RunReport> {
    let sensor = match config.seed {
        Some(seed) => SimulatedSensor::seeded(seed),
        None => SimulatedSensor::new(),
    };
    // Allocate before opening: a bad session must not truncate the old log
    let session = Session::new(config.session)?;
    let sink = CsvSampleLog::create(&config.log_file, config.timestamps)?;
    let runner = Runner::with_session(session, config, sensor, sink, SystemClock, Console::stdout())?;

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let report = runner.run(cancel).await;
    watcher.abort();

    info!(
        reason = %report.reason,
        ticks = report.ticks,
        alerts = report.alerts,
        sink_errors = report.sink_errors,
        log_file = %config.log_file.display(),
        "session finished"
    );
    Ok(report)
}

/// Cancel `token` on the first Ctrl-C. The handler does nothing else.
pub async fn cancel_on_ctrl_c(token: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("interrupt received, finishing current sample");
            token.cancel();
        }
        Err(e) => tracing::warn!("cannot listen for Ctrl-C: {e}"),
    }
}
