//! Status Bar
//!
//! Renders the page's current status message, if any.

use leptos::prelude::*;

use crate::context::use_page_context;

#[component]
pub fn StatusBar() -> impl IntoView {
    let ctx = use_page_context();

    view! {
        <div class="status-bar" aria-live="polite">
            {move || ctx.status.with(|n| n.current().cloned()).map(|msg| view! {
                <div class=msg.kind.class()>{msg.text}</div>
            })}
        </div>
    }
}
