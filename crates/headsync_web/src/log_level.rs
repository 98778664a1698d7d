//! Console log level bookkeeping.
//!
//! # Invariants
//! - The first accepted level stays active for the page lifetime.
//! - Re-initializing with the same level is a no-op; a different level is a
//!   conflict, never a silent switch.

use log::LevelFilter;
use std::sync::OnceLock;

/// Records which level the console logger was installed with.
pub struct LevelGate {
    active: OnceLock<LevelFilter>,
}

impl LevelGate {
    pub const fn new() -> Self {
        Self {
            active: OnceLock::new(),
        }
    }

    /// Claims `level` for the logger.
    ///
    /// Returns `Ok(true)` when this call set the level, `Ok(false)` when the
    /// same level was already active.
    pub fn claim(&self, level: &str) -> Result<bool, String> {
        let requested = level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|err| format!("unsupported log level `{level}`: {err}"))?;
        let mut claimed = false;
        let active = *self.active.get_or_init(|| {
            claimed = true;
            requested
        });
        if active != requested {
            return Err(format!(
                "console logging already initialized with level `{active}`; refusing `{requested}`"
            ));
        }
        Ok(claimed)
    }

    pub fn active(&self) -> Option<LevelFilter> {
        self.active.get().copied()
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::LevelGate;
    use log::LevelFilter;

    #[test]
    fn same_level_is_idempotent() {
        let gate = LevelGate::new();
        assert_eq!(gate.claim("info"), Ok(true));
        assert_eq!(gate.claim(" INFO "), Ok(false));
        assert_eq!(gate.active(), Some(LevelFilter::Info));
    }

    #[test]
    fn different_level_is_rejected() {
        let gate = LevelGate::new();
        gate.claim("debug").expect("first level is accepted");
        let err = gate.claim("warn").expect_err("switching level must fail");
        assert!(err.contains("already initialized"), "{err}");
        assert_eq!(gate.active(), Some(LevelFilter::Debug));
    }

    #[test]
    fn unknown_level_leaves_gate_unset() {
        let gate = LevelGate::new();
        let err = gate.claim("verbose").expect_err("unknown level");
        assert!(err.contains("unsupported log level"), "{err}");
        assert_eq!(gate.active(), None);
    }
}
