//! Project Edit Form Component
//!
//! Pre-filled from the last fetched project; only changed fields are sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::ProjectForm;
use taskboard_core::models::Project;

use crate::api;
use crate::context::use_page_context;
use crate::store::{store_set_project, use_project_store, ProjectStateStoreFields};

#[component]
pub fn ProjectEditForm(project: Project) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_project_store();

    let form = RwSignal::new(ProjectForm::from_project(&project));
    let (pending, set_pending) = signal(false);
    let project_id = project.id;

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let patch = match form.get().diff(&project) {
            Ok(patch) => patch,
            Err(e) => {
                ctx.error(e.to_string());
                return;
            }
        };
        if patch.is_empty() {
            store.mode().update(|m| m.end_edit());
            ctx.info("No changes.");
            return;
        }
        set_pending.set(true);

        spawn_local(async move {
            match api::client().update_project(project_id, &patch).await {
                Ok(saved) => {
                    store_set_project(&store, saved);
                    ctx.info("Project updated.");
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="edit-form" on:submit=save>
            <label>"Title"
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.title.clone())
                    on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                />
            </label>
            <label>"Description"
                <textarea
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </label>
            <label>"Due date"
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.due_date.clone())
                    on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
                />
            </label>
            <div class="actions">
                <button type="submit" disabled=move || pending.get()>"Save"</button>
                <button type="button" on:click=move |_| store.mode().update(|m| m.end_edit())>
                    "Cancel"
                </button>
            </div>
        </form>
    }
}
