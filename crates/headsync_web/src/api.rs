//! Host-facing session API.
//!
//! # Responsibility
//! - Translate router callbacks (absolute hrefs) into controller calls.
//! - Return flat response envelopes the UI shell can show or log.
//!
//! # Invariants
//! - Functions never panic; failures come back as `ok == false`.
//! - Every committed navigation goes through `HeadController::navigate`.

use headsync_core::contact::CONTACT_EMAIL;
use headsync_core::{
    resolve, ApplyReport, ContactForm, HeadController, HeadStore, Location, SyncPolicy,
};
use log::info;

/// Flat result envelope returned to the UI shell.
#[cfg_attr(
    target_arch = "wasm32",
    wasm_bindgen::prelude::wasm_bindgen(getter_with_clone)
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadActionResponse {
    pub ok: bool,
    pub message: String,
}

impl HeadActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// One mounted application: the head controller plus the routed view.
pub struct HeadSession<S: HeadStore> {
    controller: HeadController<S>,
}

impl<S: HeadStore> HeadSession<S> {
    /// Seeds navigation at `href` and mounts the view routed there.
    pub fn start(store: S, href: &str, policy: SyncPolicy) -> Result<Self, HeadActionResponse> {
        let location = Location::parse(href)
            .map_err(|err| HeadActionResponse::failure(format!("start failed: {err}")))?;
        let view = resolve(&location.path);
        let mut controller = HeadController::with_policy(store, location, policy);
        if let Some(directive) = view.directive() {
            controller
                .mount(directive)
                .map_err(|err| HeadActionResponse::failure(format!("start failed: {err}")))?;
        }
        info!(
            "event=session_start module=web status=ok path={} view={:?}",
            controller.observer().path(),
            view
        );
        Ok(Self { controller })
    }

    pub fn controller(&self) -> &HeadController<S> {
        &self.controller
    }

    /// Router callback for a committed client-side navigation.
    pub fn on_navigate(&mut self, href: &str) -> HeadActionResponse {
        let location = match Location::parse(href) {
            Ok(location) => location,
            Err(err) => return HeadActionResponse::failure(format!("navigate failed: {err}")),
        };
        let path = location.path.clone();
        let view = resolve(&path);
        match self.controller.navigate(location, view.directive()) {
            Ok(Some(report)) => HeadActionResponse::success(describe(&path, &report)),
            Ok(None) => HeadActionResponse::success(format!("{path}: head unchanged")),
            Err(err) => HeadActionResponse::failure(format!("navigate failed: {err}")),
        }
    }

    /// Application teardown.
    pub fn teardown(&mut self) -> HeadActionResponse {
        let removed = self.controller.unmount();
        HeadActionResponse::success(format!("teardown complete; structured data removed={removed}"))
    }
}

/// Validates contact input and returns the `mailto:` link as the message.
pub fn contact_mailto(form: &ContactForm) -> HeadActionResponse {
    match form.validate() {
        Ok(submission) => HeadActionResponse::success(submission.mailto(CONTACT_EMAIL)),
        Err(err) => HeadActionResponse::failure(err.to_string()),
    }
}

fn describe(path: &str, report: &ApplyReport) -> String {
    let mut message = format!(
        "{path}: applied canonical={}",
        report.canonical_href.as_deref().unwrap_or("(kept)")
    );
    if !report.skipped.is_empty() {
        message.push_str(&format!("; skipped {} field(s)", report.skipped.len()));
    }
    if let Some(err) = &report.structured_data_error {
        message.push_str(&format!("; {err}"));
    }
    message
}
