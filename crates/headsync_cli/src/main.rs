//! Head synchronization smoke probe.
//!
//! # Responsibility
//! - Walk every routed view through the in-memory head store.
//! - Print the resulting head so core wiring can be checked without a browser.
//!
//! Environment:
//! - `HEADSYNC_ORIGIN`: site origin, default `http://localhost:8080`.
//! - `HEADSYNC_LOG_DIR`: absolute directory; enables file logging when set.
//! - `HEADSYNC_LOG_LEVEL`: log level, default depends on build mode.

use headsync_core::site::routes;
use headsync_core::{
    core_version, default_log_level, init_logging, HeadController, Location, MemoryHeadStore,
    SyncPolicy,
};
use std::error::Error;
use std::process::ExitCode;

const DEFAULT_ORIGIN: &str = "http://localhost:8080";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("headsync: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Ok(log_dir) = std::env::var("HEADSYNC_LOG_DIR") {
        let level = std::env::var("HEADSYNC_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let origin = std::env::var("HEADSYNC_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
    let start = Location::parse(&origin)?;
    println!("headsync_core version={}", core_version());

    let mut controller = HeadController::with_policy(
        MemoryHeadStore::new(),
        start.with_path("/"),
        SyncPolicy::strict(),
    );
    for (path, view) in routes() {
        controller.navigate(start.with_path(*path), view.directive())?;
        println!("\n== {path} ({view:?})");
        println!("{}", controller.store().render_html());
    }

    let removed = controller.unmount();
    log::info!("event=cli_done module=cli status=ok structured_data_removed={removed}");
    println!("\n== teardown structured_data_removed={removed}");
    Ok(())
}
