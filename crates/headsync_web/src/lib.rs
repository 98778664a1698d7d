//! Browser binding for `headsync_core`.
//!
//! # Responsibility
//! - Bind `HeadStore` to the live document head on `wasm32`.
//! - Expose start/navigate/teardown entry points to the UI shell.
//!
//! # Invariants
//! - Exported functions never panic across the JS boundary.
//! - One session per page; it lives on the UI thread.

pub mod api;
pub mod log_level;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use api::{contact_mailto, HeadActionResponse, HeadSession};

#[cfg(target_arch = "wasm32")]
mod bindings {
    use crate::api::{contact_mailto, HeadActionResponse, HeadSession};
    use crate::console;
    use crate::dom::DomHeadStore;
    use headsync_core::{default_log_level, ContactForm, SyncPolicy};
    use std::cell::RefCell;
    use wasm_bindgen::prelude::wasm_bindgen;

    thread_local! {
        static SESSION: RefCell<Option<HeadSession<DomHeadStore>>> = const { RefCell::new(None) };
    }

    /// Starts the head session for the current page.
    ///
    /// `level` falls back to the build-mode default when empty.
    #[wasm_bindgen]
    pub fn start(level: String) -> HeadActionResponse {
        let level = if level.trim().is_empty() {
            default_log_level().to_string()
        } else {
            level
        };
        if let Err(err) = console::init(&level) {
            return HeadActionResponse {
                ok: false,
                message: err,
            };
        }

        let Some(window) = web_sys::window() else {
            return failure("start failed: no window");
        };
        let href = match window.location().href() {
            Ok(href) => href,
            Err(err) => return failure(format!("start failed: {err:?}")),
        };
        let Some(store) = DomHeadStore::from_window() else {
            return failure("start failed: no document");
        };

        match HeadSession::start(store, &href, SyncPolicy::default()) {
            Ok(session) => {
                SESSION.with(|slot| *slot.borrow_mut() = Some(session));
                HeadActionResponse {
                    ok: true,
                    message: format!("started at {href}"),
                }
            }
            Err(response) => response,
        }
    }

    /// Router callback: call after each committed client-side navigation.
    #[wasm_bindgen]
    pub fn on_navigate(href: String) -> HeadActionResponse {
        SESSION.with(|slot| match slot.borrow_mut().as_mut() {
            Some(session) => session.on_navigate(&href),
            None => failure("navigate failed: session not started"),
        })
    }

    /// Application teardown; drops the session.
    #[wasm_bindgen]
    pub fn teardown() -> HeadActionResponse {
        SESSION.with(|slot| match slot.borrow_mut().take() {
            Some(mut session) => session.teardown(),
            None => failure("teardown skipped: session not started"),
        })
    }

    /// Validates the contact form and returns the `mailto:` link.
    #[wasm_bindgen]
    pub fn contact_link(
        name: String,
        email: String,
        subject: Option<String>,
        message: String,
    ) -> HeadActionResponse {
        contact_mailto(&ContactForm {
            name,
            email,
            subject,
            message,
        })
    }

    fn failure(message: impl Into<String>) -> HeadActionResponse {
        HeadActionResponse {
            ok: false,
            message: message.into(),
        }
    }
}
