//! Add Member Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_page_context;
use crate::store::{store_set_project, use_project_store};

/// Adds a member by email; the project is re-rendered from the response
#[component]
pub fn AddMemberForm(project_id: u32) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_project_store();

    let (email, set_email) = signal(String::new());
    let (pending, set_pending) = signal(false);

    let add_member = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let value = email.get();
        set_pending.set(true);

        spawn_local(async move {
            match api::client().add_member(project_id, &value).await {
                Ok(project) => {
                    set_email.set(String::new());
                    store_set_project(&store, project);
                    ctx.info("Member added.");
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="add-member-form" on:submit=add_member>
            <input
                type="text"
                placeholder="Member email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Add member"</button>
        </form>
    }
}
