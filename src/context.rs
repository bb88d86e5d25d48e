//! Page Context
//!
//! Per-page state provided via Leptos Context API: the status notifier
//! and the reload trigger. Created when a page mounts.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use taskboard_core::config::STATUS_CLEAR_MS;
use taskboard_core::page::{resolve_error, ErrorAction};
use taskboard_core::routes::Route;
use taskboard_core::status::Notifier;
use taskboard_core::ApiError;

use crate::api;

#[derive(Clone, Copy)]
pub struct PageContext {
    /// Current status message
    pub status: RwSignal<Notifier>,
    /// Bumped to re-fetch the page entity - read
    pub reload_trigger: ReadSignal<u32>,
    /// Bumped to re-fetch the page entity - write
    set_reload_trigger: WriteSignal<u32>,
}

impl PageContext {
    pub fn new() -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            status: RwSignal::new(Notifier::default()),
            reload_trigger,
            set_reload_trigger,
        }
    }

    /// Show a message and clear it after a few seconds unless replaced
    pub fn notify(&self, text: impl Into<String>, is_error: bool) {
        let text = text.into();
        if is_error {
            log::warn!("[STATUS] {}", text);
        }
        let Some(generation) = self.status.try_update(|n| n.show(text, is_error)) else {
            return;
        };
        let status = self.status;
        Timeout::new(STATUS_CLEAR_MS, move || {
            status.update(|n| {
                n.clear_if(generation);
            });
        })
        .forget();
    }

    pub fn info(&self, text: impl Into<String>) {
        self.notify(text, false);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(text, true);
    }

    /// Report a failed call; a 401 ends the session and goes to login
    pub fn fail(&self, error: &ApiError) {
        match resolve_error(error, api::client().session()) {
            ErrorAction::RedirectToLogin => api::navigate(Route::LOGIN),
            ErrorAction::Show(message) => self.error(message),
        }
    }

    /// Trigger a re-fetch of the page entity
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_page_context() -> PageContext {
    use_context::<PageContext>().expect("PageContext should be provided")
}
