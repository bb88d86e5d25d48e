//! Delete Confirm Button Component
//!
//! Two-click delete: the first click arms the button, a second click
//! within the confirmation window runs `on_confirm`. An armed button
//! that is not clicked again disarms itself and reports "Action cancelled.".

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use taskboard_core::config::DELETE_CONFIRM_WINDOW_MS;
use taskboard_core::page::{DeleteClick, DeleteGuard, ACTION_CANCELLED};

use crate::api;
use crate::context::use_page_context;

/// Passed to `on_confirm`; call `failed` to re-enable the button
#[derive(Clone, Copy)]
pub struct DeleteHandle(RwSignal<DeleteGuard>);

impl DeleteHandle {
    pub fn failed(&self) {
        self.0.update(|g| g.failed());
    }
}

/// Inline two-step delete button
///
/// # Arguments
/// * `label` - Text of the idle button (e.g. "Delete project")
/// * `button_class` - CSS class for the button
/// * `on_confirm` - Runs on the confirming click; the button stays disabled until `DeleteHandle::failed`
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<DeleteHandle>,
) -> impl IntoView {
    let ctx = use_page_context();
    let guard = RwSignal::new(DeleteGuard::default());
    let (armed, set_armed) = signal(false);

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let clicked_at = api::now_ms();
        let Some(click) = guard.try_update(|g| g.click(clicked_at)).flatten() else {
            return;
        };
        match click {
            DeleteClick::Armed => {
                set_armed.set(true);
                Timeout::new(DELETE_CONFIRM_WINDOW_MS, move || {
                    let deadline = clicked_at + DELETE_CONFIRM_WINDOW_MS as u64;
                    let expired = guard
                        .try_update(|g| g.expire(api::now_ms().max(deadline)))
                        .unwrap_or(false);
                    if expired {
                        set_armed.set(false);
                        ctx.info(ACTION_CANCELLED);
                    }
                })
                .forget();
            }
            DeleteClick::Confirmed => {
                set_armed.set(false);
                on_confirm.run(DeleteHandle(guard));
            }
        }
    };

    let busy = move || guard.with(|g| g.is_busy());
    let class = move || {
        if armed.get() {
            format!("{} armed", button_class)
        } else {
            button_class.clone()
        }
    };

    view! {
        <button type="button" class=class disabled=busy on:click=on_click>
            {move || {
                if busy() {
                    "Deleting...".to_string()
                } else if armed.get() {
                    "Click again to confirm".to_string()
                } else {
                    label.clone()
                }
            }}
        </button>
    }
}
