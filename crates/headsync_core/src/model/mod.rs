//! Head metadata data model.
//!
//! # Responsibility
//! - Define the per-view directive consumed by the synchronizer.
//! - Define slot identities and the ownership registry.
//!
//! # Invariants
//! - Directives are values; they never reference head state.
//! - Every managed tag is addressed by exactly one `HeadSlot`.

pub mod directive;
pub mod slot;
