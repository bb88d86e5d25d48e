//! New Project Modal

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::ProjectForm;

use crate::api;
use crate::context::use_page_context;
use crate::store::{store_add_project, use_projects_store};

#[component]
pub fn NewProjectModal(open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_projects_store();

    let form = RwSignal::new(ProjectForm::default());
    let (pending, set_pending) = signal(false);

    let close = move || {
        form.set(ProjectForm::default());
        open.set(false);
    };

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let project = match form.get().to_new_project() {
            Ok(project) => project,
            Err(e) => {
                ctx.error(e.to_string());
                return;
            }
        };
        set_pending.set(true);

        spawn_local(async move {
            match api::client().create_project(&project).await {
                Ok(created) => {
                    ctx.info(format!("Project \"{}\" created.", created.title));
                    store_add_project(&store, created);
                    close();
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <form class="modal" on:submit=create on:click=|ev| ev.stop_propagation()>
                    <h2>"New project"</h2>
                    <input
                        type="text"
                        placeholder="Title"
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description (optional)"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <input
                        type="date"
                        prop:value=move || form.with(|f| f.due_date.clone())
                        on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
                    />
                    <div class="actions">
                        <button type="submit" disabled=move || pending.get()>"Create"</button>
                        <button type="button" on:click=move |_| close()>"Cancel"</button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
