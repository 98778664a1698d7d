//! Static site routes and per-view directive producers.
//!
//! # Responsibility
//! - Map request paths to routed views.
//! - Produce each view's `MetadataDirective` with its route as canonical path.
//!
//! # Invariants
//! - Every routed view except the not-found fallback yields a directive.
//! - Directive title/description are non-empty literals.

pub mod pages;

use crate::model::directive::MetadataDirective;

/// Routed views of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageView {
    Landing,
    About,
    Resume,
    Work,
    NotFound,
}

/// One entry of the primary navigation header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub to: &'static str,
    pub label: &'static str,
}

const ROUTES: &[(&str, PageView)] = &[
    ("/", PageView::Landing),
    ("/about", PageView::About),
    ("/resume", PageView::Resume),
    ("/work", PageView::Work),
];

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        to: "/about",
        label: "About",
    },
    NavItem {
        to: "/resume",
        label: "Resume",
    },
    NavItem {
        to: "/work",
        label: "Sample of Work",
    },
];

/// Registered routes in declaration order; the fallback is not listed.
pub fn routes() -> &'static [(&'static str, PageView)] {
    ROUTES
}

/// Header links, in display order.
pub fn nav_items() -> &'static [NavItem] {
    NAV_ITEMS
}

/// Resolves a location path to its view. Unknown paths hit the fallback.
pub fn resolve(path: &str) -> PageView {
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, view)| *view)
        .unwrap_or(PageView::NotFound)
}

impl NavItem {
    /// Header highlight rule: exact path match.
    pub fn is_active(&self, path: &str) -> bool {
        self.to == path
    }
}

impl PageView {
    /// Registered route path, `None` for the fallback.
    pub fn route_path(self) -> Option<&'static str> {
        ROUTES
            .iter()
            .find(|(_, view)| *view == self)
            .map(|(route, _)| *route)
    }

    /// Head directive produced when this view renders.
    pub fn directive(self) -> Option<MetadataDirective> {
        let directive = match self {
            Self::Landing => pages::landing(),
            Self::About => pages::about(),
            Self::Resume => pages::resume(),
            Self::Work => pages::work(),
            Self::NotFound => return None,
        };
        Some(match self.route_path() {
            Some(path) => directive.with_canonical_path(path),
            None => directive,
        })
    }
}
