//! New Task Form Component
//!
//! Task creation on the project page: title, description, priority,
//! assignee and due date. Validated before anything is sent.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::TaskForm;
use taskboard_core::models::TaskPriority;
use taskboard_core::view::{priority_label, SelectOption};

use crate::api;
use crate::context::use_page_context;

#[component]
pub fn NewTaskForm(project_id: u32, assignees: Vec<SelectOption>) -> impl IntoView {
    let ctx = use_page_context();

    let form = RwSignal::new(TaskForm::default());
    let (pending, set_pending) = signal(false);

    let create_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let task = match form.get().to_new_task() {
            Ok(task) => task,
            Err(e) => {
                ctx.error(e.to_string());
                return;
            }
        };
        set_pending.set(true);

        spawn_local(async move {
            match api::client().create_task(project_id, &task).await {
                Ok(created) => {
                    form.set(TaskForm::default());
                    ctx.info(format!("Task \"{}\" created.", created.title));
                    ctx.reload();
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="new-task-form" on:submit=create_task>
            <h3>"New task"</h3>
            <input
                type="text"
                placeholder="Title"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
            <textarea
                placeholder="Description (at least 10 characters)"
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            ></textarea>
            <select
                prop:value=move || form.with(|f| f.priority.clone())
                on:change=move |ev| form.update(|f| f.priority = event_target_value(&ev))
            >
                {TaskPriority::ALL.iter().map(|p| view! {
                    <option value=p.as_str()>{priority_label(*p)}</option>
                }).collect_view()}
            </select>
            <select
                prop:value=move || form.with(|f| f.assignee.clone())
                on:change=move |ev| form.update(|f| f.assignee = event_target_value(&ev))
            >
                {assignees.into_iter().map(|opt| view! {
                    <option value=opt.value>{opt.label}</option>
                }).collect_view()}
            </select>
            <input
                type="date"
                prop:value=move || form.with(|f| f.due_date.clone())
                on:input=move |ev| form.update(|f| f.due_date = event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Create task"</button>
        </form>
    }
}
