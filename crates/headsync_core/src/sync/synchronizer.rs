//! Head synchronizer.
//!
//! # Responsibility
//! - Reconcile the document head against the latest `MetadataDirective`.
//! - Own creation, update and removal of every managed slot node.
//!
//! # Invariants
//! - At most one owned node per slot; repeated writes update in place.
//! - Pre-existing nodes are adopted (first match), never duplicated.
//! - Optional image slots are never removed as a side effect.
//! - Structured-data failures never block the other slots.
//! - Structured data is removed by `apply` only when the directive has none
//!   and the path differs from the last applied path; `retract` removes it only
//!   when the current path differs from the previous directive's canonical path.

use crate::head::{HeadStore, HeadStoreError};
use crate::model::directive::{DirectiveError, MetadataDirective, StructuredDataError};
use crate::model::slot::{
    HeadSlot, NodeId, SlotRegistry, OG_TYPE_WEBSITE, TWITTER_CARD_LARGE_IMAGE,
};
use crate::sync::navigation::Location;
use crate::sync::policy::{InvalidFieldPolicy, SyncPolicy};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Synchronizer failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Rejected under `InvalidFieldPolicy::Reject`; nothing was written.
    InvalidDirective(DirectiveError),
    Store(HeadStoreError),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDirective(err) => write!(f, "invalid metadata directive: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDirective(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<HeadStoreError> for SyncError {
    fn from(value: HeadStoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of one `apply` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Canonical href written, `None` when the canonical slots were skipped.
    pub canonical_href: Option<String>,
    /// Fields left untouched under `InvalidFieldPolicy::KeepPrevious`.
    pub skipped: Vec<DirectiveError>,
    pub structured_data_error: Option<StructuredDataError>,
    pub structured_data_removed: bool,
}

/// Reconciles one head store against successive directives.
pub struct HeadSynchronizer<S: HeadStore> {
    store: S,
    registry: SlotRegistry,
    policy: SyncPolicy,
    last_applied_path: Option<String>,
}

impl<S: HeadStore> HeadSynchronizer<S> {
    /// Creates a synchronizer with the build-mode default policy.
    pub fn new(store: S) -> Self {
        Self::with_policy(store, SyncPolicy::default())
    }

    pub fn with_policy(store: S, policy: SyncPolicy) -> Self {
        Self {
            store,
            registry: SlotRegistry::new(),
            policy,
            last_applied_path: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable store access for hosts that also let other agents write.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    pub fn policy(&self) -> SyncPolicy {
        self.policy
    }

    pub fn last_applied_path(&self) -> Option<&str> {
        self.last_applied_path.as_deref()
    }

    /// Makes the head reflect `directive` at `location`.
    ///
    /// # Errors
    /// - `SyncError::InvalidDirective` under `Reject` when a field breaks its
    ///   contract; no slot is touched.
    /// - `SyncError::Store` when the backing store fails.
    pub fn apply(
        &mut self,
        directive: &MetadataDirective,
        location: &Location,
    ) -> SyncResult<ApplyReport> {
        let issues = directive.issues();
        if let Some(first) = issues.first() {
            if self.policy.invalid_fields == InvalidFieldPolicy::Reject {
                error!(
                    "event=head_apply module=sync status=rejected path={} field={} error={}",
                    location.path,
                    first.field(),
                    first
                );
                return Err(SyncError::InvalidDirective(first.clone()));
            }
            for issue in &issues {
                warn!(
                    "event=head_apply module=sync status=skipped path={} field={} error={}",
                    location.path,
                    issue.field(),
                    issue
                );
            }
        }

        let title_ok = !issues.contains(&DirectiveError::EmptyTitle);
        let description_ok = !issues.contains(&DirectiveError::EmptyDescription);
        let canonical_ok = !issues
            .iter()
            .any(|issue| matches!(issue, DirectiveError::RelativeCanonicalPath(_)));
        let image = directive.image.as_deref().filter(|_| {
            !issues
                .iter()
                .any(|issue| matches!(issue, DirectiveError::RelativeImageUrl(_)))
        });

        let mut report = ApplyReport {
            skipped: issues,
            ..ApplyReport::default()
        };

        if title_ok {
            self.store.set_title(&directive.title);
        }
        if description_ok {
            self.upsert(HeadSlot::DESCRIPTION, &directive.description)?;
        }

        let href = canonical_ok.then(|| canonical_href(directive, location));
        if let Some(href) = href.as_deref() {
            self.upsert(HeadSlot::CANONICAL, href)?;
        }

        if title_ok {
            self.upsert(HeadSlot::OG_TITLE, &directive.title)?;
        }
        if description_ok {
            self.upsert(HeadSlot::OG_DESCRIPTION, &directive.description)?;
        }
        self.upsert(HeadSlot::OG_TYPE, OG_TYPE_WEBSITE)?;
        if let Some(href) = href.as_deref() {
            self.upsert(HeadSlot::OG_URL, href)?;
        }
        if let Some(image) = image {
            self.upsert(HeadSlot::OG_IMAGE, image)?;
        }

        self.upsert(HeadSlot::TWITTER_CARD, TWITTER_CARD_LARGE_IMAGE)?;
        if title_ok {
            self.upsert(HeadSlot::TWITTER_TITLE, &directive.title)?;
        }
        if description_ok {
            self.upsert(HeadSlot::TWITTER_DESCRIPTION, &directive.description)?;
        }
        if let Some(image) = image {
            self.upsert(HeadSlot::TWITTER_IMAGE, image)?;
        }

        let path_changed = self.last_applied_path.as_deref() != Some(location.path.as_str());
        match &directive.structured_data {
            Some(data) => match data.to_json() {
                Ok(json) => {
                    self.upsert(HeadSlot::STRUCTURED_DATA, &json)?;
                }
                Err(err) => {
                    error!(
                        "event=structured_data module=sync status=error path={} error={}",
                        location.path, err
                    );
                    report.structured_data_error = Some(err);
                    if path_changed {
                        report.structured_data_removed = self.release(&HeadSlot::STRUCTURED_DATA);
                    }
                }
            },
            None if path_changed => {
                report.structured_data_removed = self.release(&HeadSlot::STRUCTURED_DATA);
            }
            None => {}
        }

        self.last_applied_path = Some(location.path.clone());
        report.canonical_href = href;

        info!(
            "event=head_apply module=sync status=ok path={} owned_slots={} skipped={}",
            location.path,
            self.registry.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Retracts what `previous` left in the structured-data slot.
    ///
    /// Removes the node only when `current_path` differs from the previous
    /// directive's canonical path (falling back to `current_path` itself).
    /// Returns whether a node was removed.
    pub fn retract(&mut self, previous: &MetadataDirective, current_path: &str) -> bool {
        let anchor = previous.canonical_path.as_deref().unwrap_or(current_path);
        if current_path == anchor {
            debug!(
                "event=head_retract module=sync status=kept path={} anchor={}",
                current_path, anchor
            );
            return false;
        }
        let removed = self.release(&HeadSlot::STRUCTURED_DATA);
        debug!(
            "event=head_retract module=sync status=ok path={} anchor={} removed={}",
            current_path, anchor, removed
        );
        removed
    }

    /// View teardown: drops the structured-data node unconditionally.
    ///
    /// Safe to call when nothing is owned.
    pub fn teardown(&mut self) -> bool {
        let removed = self.release(&HeadSlot::STRUCTURED_DATA);
        info!("event=head_teardown module=sync status=ok removed={removed}");
        removed
    }

    fn upsert(&mut self, slot: HeadSlot, value: &str) -> SyncResult<NodeId> {
        if let Some(node) = self.registry.get(&slot) {
            match self.store.write(node, value) {
                Ok(()) => return Ok(node),
                Err(HeadStoreError::Detached(_)) => {
                    warn!(
                        "event=slot_upsert module=sync status=detached slot={} node={}",
                        slot, node
                    );
                    self.registry.remove(&slot);
                    self.store.forget(node);
                }
                Err(err) => return Err(err.into()),
            }
        }

        // First write to this slot: adopt whatever is already there.
        let (node, action) = match self.store.find_first(&slot) {
            Some(node) => (node, "adopt"),
            None => (self.store.create(&slot)?, "create"),
        };
        self.store.write(node, value)?;
        self.registry.insert(slot, node);
        debug!(
            "event=slot_upsert module=sync status=ok slot={} node={} action={}",
            slot, node, action
        );
        Ok(node)
    }

    fn release(&mut self, slot: &HeadSlot) -> bool {
        let node = match self.registry.remove(slot) {
            Some(node) => Some(node),
            None => self.store.find_first(slot),
        };
        match node {
            Some(node) => self.store.remove(node),
            None => false,
        }
    }
}

/// Absolute canonical URL for `directive` at `location`.
pub fn canonical_href(directive: &MetadataDirective, location: &Location) -> String {
    match directive.canonical_path.as_deref() {
        Some(path) => format!("{}{}", location.origin, path),
        None => location.href(),
    }
}

#[cfg(test)]
mod tests {
    use super::{canonical_href, HeadSynchronizer, SyncError};
    use crate::head::memory::MemoryHeadStore;
    use crate::head::{HeadStore, HeadStoreResult};
    use crate::model::directive::{DirectiveError, MetadataDirective};
    use crate::model::slot::{HeadSlot, NodeId};
    use crate::sync::navigation::Location;
    use crate::sync::policy::SyncPolicy;

    fn at(path: &str) -> Location {
        Location::new("https://example.com", path)
    }

    #[test]
    fn canonical_href_joins_origin_and_path() {
        let directive = MetadataDirective::new("t", "d").with_canonical_path("/about");
        assert_eq!(
            canonical_href(&directive, &at("/ignored")),
            "https://example.com/about"
        );
    }

    #[test]
    fn canonical_href_falls_back_to_full_location() {
        let directive = MetadataDirective::new("t", "d");
        let location = at("/work").with_search("?tab=1").with_hash("#top");
        assert_eq!(
            canonical_href(&directive, &location),
            "https://example.com/work?tab=1#top"
        );
    }

    #[test]
    fn detached_owned_node_is_recreated() {
        let mut sync = HeadSynchronizer::with_policy(MemoryHeadStore::new(), SyncPolicy::strict());
        let directive = MetadataDirective::new("t", "d");
        sync.apply(&directive, &at("/")).expect("first apply");

        let owned = sync
            .registry()
            .get(&HeadSlot::DESCRIPTION)
            .expect("description owned");
        assert!(sync.store_mut().remove(owned));

        sync.apply(&directive, &at("/")).expect("second apply");
        assert_eq!(sync.store().count(&HeadSlot::DESCRIPTION), 1);
        assert_ne!(sync.registry().get(&HeadSlot::DESCRIPTION), Some(owned));
    }

    /// Memory store that records `forget` calls.
    #[derive(Default)]
    struct ForgetfulStore {
        inner: MemoryHeadStore,
        forgotten: Vec<NodeId>,
    }

    impl HeadStore for ForgetfulStore {
        fn set_title(&mut self, title: &str) {
            self.inner.set_title(title);
        }

        fn title(&self) -> String {
            self.inner.title()
        }

        fn find_first(&self, slot: &HeadSlot) -> Option<NodeId> {
            self.inner.find_first(slot)
        }

        fn create(&mut self, slot: &HeadSlot) -> HeadStoreResult<NodeId> {
            self.inner.create(slot)
        }

        fn write(&mut self, node: NodeId, value: &str) -> HeadStoreResult<()> {
            self.inner.write(node, value)
        }

        fn remove(&mut self, node: NodeId) -> bool {
            self.inner.remove(node)
        }

        fn forget(&mut self, node: NodeId) {
            self.forgotten.push(node);
        }

        fn count(&self, slot: &HeadSlot) -> usize {
            self.inner.count(slot)
        }
    }

    #[test]
    fn detached_node_is_forgotten_by_the_store() {
        let mut sync =
            HeadSynchronizer::with_policy(ForgetfulStore::default(), SyncPolicy::strict());
        let directive = MetadataDirective::new("t", "d");
        sync.apply(&directive, &at("/")).expect("first apply");

        let owned = sync
            .registry()
            .get(&HeadSlot::OG_TITLE)
            .expect("og:title owned");
        assert!(sync.store_mut().inner.remove(owned));

        sync.apply(&directive, &at("/")).expect("second apply");
        assert_eq!(sync.store().forgotten, vec![owned]);
        assert_eq!(sync.store().count(&HeadSlot::OG_TITLE), 1);
    }

    #[test]
    fn strict_policy_rejects_before_writing() {
        let mut sync = HeadSynchronizer::with_policy(MemoryHeadStore::new(), SyncPolicy::strict());
        let err = sync
            .apply(&MetadataDirective::new("", "d"), &at("/"))
            .expect_err("empty title must be rejected");
        assert_eq!(err, SyncError::InvalidDirective(DirectiveError::EmptyTitle));
        assert!(sync.store().is_empty());
        assert!(sync.registry().is_empty());
        assert_eq!(sync.last_applied_path(), None);
    }

    #[test]
    fn teardown_without_owned_node_is_a_no_op() {
        let mut sync = HeadSynchronizer::new(MemoryHeadStore::new());
        assert!(!sync.teardown());
        assert!(!sync.teardown());
    }
}
