//! Task Edit Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::TaskEditForm as TaskEditDraft;
use taskboard_core::models::{Task, TaskPriority, TaskStatus};
use taskboard_core::view::{priority_label, status_label};

use crate::api;
use crate::context::use_page_context;
use crate::store::{store_set_task, use_task_store, TaskStateStoreFields};

#[component]
pub fn TaskEditForm(task: Task) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_task_store();

    let form = RwSignal::new(TaskEditDraft::from_task(&task));
    let (pending, set_pending) = signal(false);
    let task_id = task.id;

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let patch = match form.get().diff(&task) {
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
            match api::client().update_task(task_id, &patch).await {
                Ok(saved) => {
                    store_set_task(&store, saved);
                    ctx.info("Task updated.");
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
            <label>"Priority"
                <select
                    prop:value=move || form.with(|f| f.priority.clone())
                    on:change=move |ev| form.update(|f| f.priority = event_target_value(&ev))
                >
                    {TaskPriority::ALL.iter().map(|p| view! {
                        <option value=p.as_str()>{priority_label(*p)}</option>
                    }).collect_view()}
                </select>
            </label>
            <label>"Status"
                <select
                    prop:value=move || form.with(|f| f.status.clone())
                    on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                >
                    {TaskStatus::ALL.iter().map(|s| view! {
                        <option value=s.as_str()>{status_label(*s)}</option>
                    }).collect_view()}
                </select>
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
