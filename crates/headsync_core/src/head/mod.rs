//! Document head capability.
//!
//! # Responsibility
//! - Abstract the single mutable document head behind a small trait.
//! - Keep synchronizer logic independent of any live browser document.
//!
//! # Invariants
//! - A store never deduplicates on its own; ownership lives in `SlotRegistry`.
//! - Removing a node that is already gone is a no-op, never an error.

pub mod memory;

use crate::model::slot::{HeadSlot, NodeId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HeadStoreResult<T> = Result<T, HeadStoreError>;

/// Mutable document head the synchronizer writes into.
pub trait HeadStore {
    /// Overwrites the page title.
    fn set_title(&mut self, title: &str);

    /// Current page title.
    fn title(&self) -> String;

    /// First existing node matching `slot`, in document order.
    ///
    /// Used once per slot to adopt tags inserted by other agents.
    fn find_first(&self, slot: &HeadSlot) -> Option<NodeId>;

    /// Appends a new, empty node shaped for `slot`.
    fn create(&mut self, slot: &HeadSlot) -> HeadStoreResult<NodeId>;

    /// Writes the slot value (`content`, `href` or script text) on `node`.
    fn write(&mut self, node: NodeId, value: &str) -> HeadStoreResult<()>;

    /// Detaches `node`. Returns `false` when it was already gone.
    fn remove(&mut self, node: NodeId) -> bool;

    /// Drops any bookkeeping for a node the synchronizer no longer owns
    /// because it was detached behind its back.
    fn forget(&mut self, _node: NodeId) {}

    /// Number of live nodes matching `slot`.
    fn count(&self, slot: &HeadSlot) -> usize;
}

/// Head store failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadStoreError {
    /// The node was removed from the head by something else.
    Detached(NodeId),
    /// Host-level failure (for example a DOM exception).
    Backend(String),
}

impl Display for HeadStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Detached(node) => write!(f, "head node is no longer attached: {node}"),
            Self::Backend(message) => write!(f, "head store backend error: {message}"),
        }
    }
}

impl Error for HeadStoreError {}
