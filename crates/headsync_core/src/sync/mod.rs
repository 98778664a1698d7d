//! Head synchronization.
//!
//! # Responsibility
//! - Reconcile head state with the active view's directive.
//! - Order retraction and application across client-side navigations.
//!
//! # Invariants
//! - All head writes go through `HeadSynchronizer`.
//! - Retract-then-apply ordering holds for every committed navigation.

pub mod navigation;
pub mod policy;
pub mod synchronizer;
