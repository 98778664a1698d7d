//! Document head metadata synchronization.
//! Keeps title, description, canonical, social-preview and linked-data tags in
//! step with the active client-side view.

pub mod contact;
pub mod head;
pub mod logging;
pub mod model;
pub mod site;
pub mod sync;

pub use contact::{ContactField, ContactForm, ContactSubmission, ContactValidationError};
pub use head::memory::MemoryHeadStore;
pub use head::{HeadStore, HeadStoreError, HeadStoreResult};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::directive::{
    DirectiveError, MetadataDirective, StructuredData, StructuredDataError,
};
pub use model::slot::{HeadSlot, NodeId, SlotKind, SlotRegistry};
pub use site::{resolve, PageView};
pub use sync::navigation::{HeadController, Location, LocationError, NavigationObserver};
pub use sync::policy::{InvalidFieldPolicy, SyncPolicy};
pub use sync::synchronizer::{ApplyReport, HeadSynchronizer, SyncError, SyncResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
