//! Synchronizer configuration.

/// What to do with a directive field that breaks its contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFieldPolicy {
    /// Refuse the whole directive before any write.
    Reject,
    /// Skip slots derived from the bad field; previous content stays.
    KeepPrevious,
}

/// Synchronizer knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPolicy {
    pub invalid_fields: InvalidFieldPolicy,
}

impl SyncPolicy {
    pub fn strict() -> Self {
        Self {
            invalid_fields: InvalidFieldPolicy::Reject,
        }
    }

    pub fn lenient() -> Self {
        Self {
            invalid_fields: InvalidFieldPolicy::KeepPrevious,
        }
    }
}

impl Default for SyncPolicy {
    /// - `debug` builds -> `Reject`
    /// - `release` builds -> `KeepPrevious`
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::strict()
        } else {
            Self::lenient()
        }
    }
}
