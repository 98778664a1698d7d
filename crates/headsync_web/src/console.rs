//! `log` backend that writes to the browser console.

use crate::log_level::LevelGate;
use log::{Level, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;
static LEVEL: LevelGate = LevelGate::new();

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger.
///
/// Repeating the call with the same level is a no-op; a different level or a
/// foreign logger already installed is an error.
pub fn init(level: &str) -> Result<(), String> {
    if !LEVEL.claim(level)? {
        return Ok(());
    }
    log::set_logger(&LOGGER)
        .map_err(|err| format!("console logging unavailable: {err}"))?;
    if let Some(filter) = LEVEL.active() {
        log::set_max_level(filter);
    }
    Ok(())
}
