//! Task Detail Page

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::config::REDIRECT_AFTER_DELETE_MS;
use taskboard_core::models::Task;
use taskboard_core::page::{load_page, LoadOutcome, PageData, ViewMode};
use taskboard_core::routes::Route;
use taskboard_core::view::TaskView;

use crate::api;
use crate::components::{DeleteConfirmButton, DeleteHandle, TaskEditForm};
use crate::context::use_page_context;
use crate::store::{store_set_task, use_task_store, TaskState, TaskStateStoreFields, TaskStore};

#[component]
pub fn TaskDetailPage(id: Option<u32>) -> impl IntoView {
    let ctx = use_page_context();
    let store: TaskStore = Store::new(TaskState::default());
    provide_context(store);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let client = api::client();
            match load_page(&client, Route::Task(id)).await {
                LoadOutcome::Ready(PageData::Task(task)) => store_set_task(&store, task),
                LoadOutcome::Ready(_) => {}
                LoadOutcome::RedirectToLogin => api::navigate(Route::LOGIN),
                LoadOutcome::Failed(message) => {
                    store.mode().update(|mode| {
                        mode.load_failed(message.clone());
                    });
                    ctx.error(message);
                }
            }
        });
    });

    // Back to the owning project, or the index when unknown
    let back = move || {
        store
            .task()
            .with(|t| t.as_ref().and_then(|t| t.project_id))
            .map(|id| Route::Project(Some(id)))
            .unwrap_or(Route::Index)
    };

    view! {
        <div class="page task-page">
            <a class="back-link" href=move || back().href()>"← Back to project"</a>
            {move || match store.mode().get() {
                ViewMode::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                ViewMode::Failed(message) => view! { <p class="page-error">{message}</p> }.into_any(),
                ViewMode::Removed => view! { <p class="removed">"Task deleted. Redirecting..."</p> }.into_any(),
                mode => match store.task().get() {
                    Some(task) => view! { <TaskBody task=task editing=mode.is_editing() /> }.into_any(),
                    None => ().into_any(),
                },
            }}
        </div>
    }
}

#[component]
fn TaskBody(task: Task, editing: bool) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_task_store();

    if editing {
        return view! { <TaskEditForm task=task /> }.into_any();
    }

    let task_id = task.id;
    let model = TaskView::from_task(&task);
    let after_delete = model.project_id.map(|id| Route::Project(Some(id))).unwrap_or(Route::Index);

    let delete_task = move |handle: DeleteHandle| {
        spawn_local(async move {
            match api::client().delete_task(task_id).await {
                Ok(()) => {
                    store.mode().set(ViewMode::Removed);
                    ctx.info("Task deleted.");
                    Timeout::new(REDIRECT_AFTER_DELETE_MS, move || api::navigate(after_delete)).forget();
                }
                Err(e) => {
                    handle.failed();
                    ctx.fail(&e);
                }
            }
        });
    };

    let row = model.row;
    view! {
        <section class="task-detail">
            <h1>{row.title}</h1>
            <p class="task-description">{model.description}</p>
            <dl>
                <dt>"Priority"</dt>
                <dd><span class=row.priority_class>{row.priority}</span></dd>
                <dt>"Status"</dt>
                <dd>{row.status}</dd>
                <dt>"Created"</dt>
                <dd>{row.created}</dd>
                <dt>"Due"</dt>
                <dd>{row.due}</dd>
                <dt>"Assignee"</dt>
                <dd>{row.assignee}</dd>
                <dt>"Author"</dt>
                <dd>{model.author}</dd>
            </dl>
            <div class="actions">
                <button type="button" on:click=move |_| store.mode().update(|m| { m.begin_edit(); })>
                    "Edit"
                </button>
                <DeleteConfirmButton label="Delete task" button_class="danger-btn" on_confirm=delete_task />
            </div>
        </section>
    }
    .into_any()
}
