//! Replay Session Example
//!
//! Feeds a fixed list of readings through a session with a 3-sample window
//! and prints every event, then the session statistics.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p triaxis-core --example 01_replay_session
//! ```

use triaxis_core::{ReplaySource, Sample, SampleSource, Session, SessionConfig};

fn main() {
    println!("Triaxis Replay Session Example");
    println!("==============================\n");

    let config = SessionConfig::default().with_capacity(3).with_threshold(0.8);
    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("cannot start session: {e}");
            return;
        }
    };

    let mut source = ReplaySource::new(vec![
        Sample::new(0.10, -0.20, 0.30),
        Sample::new(0.40, 0.10, -0.10),
        Sample::new(0.95, 0.00, 0.20),
        Sample::new(-0.30, 0.60, -0.85),
        Sample::new(0.05, 0.05, 0.05),
    ]);

    println!("{}", session.start_event());
    while let Ok(sample) = source.next_sample() {
        match session.ingest(sample) {
            Ok(report) => report.events().for_each(|event| println!("{event}")),
            Err(e) => {
                eprintln!("stopped: {e}");
                break;
            }
        }
    }

    println!("\nFinal window (oldest first):");
    for (slot, sample) in session.buffer().slots() {
        println!("  [{slot}] {sample}");
    }

    println!();
    match session.finish() {
        Ok(stats) => println!("{stats}"),
        Err(e) => println!("{e}"),
    }
}
