use std::io::{self, Write};
use std::process::ExitCode;

use ad_library_transfer::{Config, pipeline, report, telemetry::init_telemetry};
use tracing::warn;

#[tokio::main]
async fn main() -> ExitCode {
    init_telemetry();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            if let Err(write_err) = writeln!(out, "❌ {}", err) {
                warn!(error = %write_err, "Failed to write report");
            }
            close(&mut out, Config::default().pause_on_exit);
            return ExitCode::FAILURE;
        }
    };

    let outcome = pipeline::run(&config).await;

    if let Err(err) = report::render(&outcome, &mut out) {
        warn!(error = %err, "Failed to write report");
    }
    close(&mut out, config.pause_on_exit);

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn close<W: Write>(out: &mut W, pause: bool) {
    if let Err(err) = report::finish(&mut io::stdin().lock(), out, pause) {
        warn!(error = %err, "Failed to close console");
    }
}
