//! Navigation observer and view-lifecycle controller.
//!
//! # Responsibility
//! - Track the committed location the synchronizer computes URLs against.
//! - Drive apply/retract in the order a client-side router commits views.
//!
//! # Invariants
//! - The observer is updated before the next view's `apply`.
//! - Retraction of the previous directive strictly precedes the next `apply`.
//! - Teardown retraction runs at most once per mounted view.
//! - Re-running with unchanged directive and path is a no-op.

use crate::head::HeadStore;
use crate::model::directive::MetadataDirective;
use crate::sync::policy::SyncPolicy;
use crate::sync::synchronizer::{ApplyReport, HeadSynchronizer, SyncResult};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Browser-style location split into its URL parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// `scheme://host[:port]`, no trailing slash.
    pub origin: String,
    /// Always starts with `/`.
    pub path: String,
    /// Empty or starts with `?`.
    pub search: String,
    /// Empty or starts with `#`.
    pub hash: String,
}

impl Location {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            path: if path.is_empty() { "/".to_string() } else { path },
            search: String::new(),
            hash: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Same origin, different path; search and hash are dropped.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self::new(self.origin.clone(), path)
    }

    /// Full URL of this location.
    pub fn href(&self) -> String {
        format!("{}{}{}{}", self.origin, self.path, self.search, self.hash)
    }

    /// Splits an absolute URL such as `https://example.com/a?b#c`.
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let href = href.trim();
        let scheme_end = href
            .find("://")
            .ok_or_else(|| LocationError::NotAbsolute(href.to_string()))?;
        if scheme_end == 0 {
            return Err(LocationError::NotAbsolute(href.to_string()));
        }

        let host_start = scheme_end + 3;
        let host_end = href[host_start..]
            .find(['/', '?', '#'])
            .map(|offset| host_start + offset)
            .unwrap_or(href.len());
        if host_end == host_start {
            return Err(LocationError::MissingHost(href.to_string()));
        }

        let rest = &href[host_end..];
        let (before_hash, hash) = match rest.find('#') {
            Some(index) => rest.split_at(index),
            None => (rest, ""),
        };
        let (path, search) = match before_hash.find('?') {
            Some(index) => before_hash.split_at(index),
            None => (before_hash, ""),
        };

        Ok(Self::new(&href[..host_end], path)
            .with_search(search)
            .with_hash(hash))
    }
}

/// Location parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    NotAbsolute(String),
    MissingHost(String),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAbsolute(value) => write!(f, "location is not an absolute URL: {value}"),
            Self::MissingHost(value) => write!(f, "location has no host: {value}"),
        }
    }
}

impl Error for LocationError {}

/// Supplies the committed location to the synchronizer.
#[derive(Debug, Clone)]
pub struct NavigationObserver {
    current: Location,
    commits: u64,
}

impl NavigationObserver {
    /// Seeds the observer with the location at first use.
    pub fn new(initial: Location) -> Self {
        debug!(
            "event=navigation_seed module=navigation status=ok path={}",
            initial.path
        );
        Self {
            current: initial,
            commits: 0,
        }
    }

    /// Records a committed navigation. Returns whether the path changed.
    pub fn commit(&mut self, next: Location) -> bool {
        let changed = next.path != self.current.path;
        debug!(
            "event=navigation_commit module=navigation status=ok from={} to={} changed={}",
            self.current.path, next.path, changed
        );
        self.current = next;
        self.commits += 1;
        changed
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn path(&self) -> &str {
        &self.current.path
    }

    /// Number of navigations committed since seeding.
    pub fn commits(&self) -> u64 {
        self.commits
    }
}

#[derive(Debug, Clone)]
struct MountedView {
    directive: MetadataDirective,
    path: String,
    // A failed apply keeps the view mounted for teardown but never counts
    // as current, so the same directive is re-applied and fails again.
    applied: bool,
}

/// Effect/cleanup driver for one routed view at a time.
///
/// Hosts call `navigate` on each committed navigation, `rerender` when the
/// active view produces a new directive, and `unmount` on teardown.
pub struct HeadController<S: HeadStore> {
    synchronizer: HeadSynchronizer<S>,
    observer: NavigationObserver,
    mounted: Option<MountedView>,
}

impl<S: HeadStore> HeadController<S> {
    pub fn new(store: S, initial: Location) -> Self {
        Self::with_policy(store, initial, SyncPolicy::default())
    }

    pub fn with_policy(store: S, initial: Location, policy: SyncPolicy) -> Self {
        Self {
            synchronizer: HeadSynchronizer::with_policy(store, policy),
            observer: NavigationObserver::new(initial),
            mounted: None,
        }
    }

    pub fn synchronizer(&self) -> &HeadSynchronizer<S> {
        &self.synchronizer
    }

    pub fn synchronizer_mut(&mut self) -> &mut HeadSynchronizer<S> {
        &mut self.synchronizer
    }

    pub fn store(&self) -> &S {
        self.synchronizer.store()
    }

    pub fn observer(&self) -> &NavigationObserver {
        &self.observer
    }

    /// Directive of the mounted view, if any.
    pub fn mounted_directive(&self) -> Option<&MetadataDirective> {
        self.mounted.as_ref().map(|view| &view.directive)
    }

    /// Mounts a view at the current location and applies its directive.
    ///
    /// A view that is already mounted is retracted first.
    pub fn mount(&mut self, directive: MetadataDirective) -> SyncResult<ApplyReport> {
        self.run_effect(directive)
    }

    /// Re-applies when the mounted view's directive changed.
    ///
    /// Returns `Ok(None)` when nothing the head depends on changed.
    pub fn rerender(&mut self, directive: MetadataDirective) -> SyncResult<Option<ApplyReport>> {
        if self.is_current(&directive) {
            return Ok(None);
        }
        self.run_effect(directive).map(Some)
    }

    /// Commits a navigation, then reconciles for the next view.
    ///
    /// `None` means the next view has no directive: the previous view is torn
    /// down and the head keeps whatever remains.
    pub fn navigate(
        &mut self,
        location: Location,
        directive: Option<MetadataDirective>,
    ) -> SyncResult<Option<ApplyReport>> {
        self.observer.commit(location);
        match directive {
            Some(directive) => self.rerender(directive),
            None => {
                self.unmount();
                Ok(None)
            }
        }
    }

    /// Tears down the mounted view. Returns whether a node was removed.
    ///
    /// Runs the teardown retraction once; later calls are no-ops.
    pub fn unmount(&mut self) -> bool {
        match self.mounted.take() {
            Some(_) => self.synchronizer.teardown(),
            None => false,
        }
    }

    fn is_current(&self, directive: &MetadataDirective) -> bool {
        self.mounted.as_ref().is_some_and(|view| {
            view.applied && view.directive == *directive && view.path == self.observer.path()
        })
    }

    fn run_effect(&mut self, directive: MetadataDirective) -> SyncResult<ApplyReport> {
        if let Some(previous) = self.mounted.take() {
            self.synchronizer
                .retract(&previous.directive, self.observer.path());
        }
        let result = self.synchronizer.apply(&directive, self.observer.current());
        self.mounted = Some(MountedView {
            directive,
            path: self.observer.path().to_string(),
            applied: result.is_ok(),
        });
        result
    }
}
