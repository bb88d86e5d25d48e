//! Project Detail Page
//!
//! Project header (view/edit/delete), members, and tasks.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::config::REDIRECT_AFTER_DELETE_MS;
use taskboard_core::models::Project;
use taskboard_core::page::{load_page, LoadOutcome, PageData, ViewMode};
use taskboard_core::routes::Route;
use taskboard_core::view::{assignee_options, ProjectView};

use crate::api;
use crate::components::{
    AddMemberForm, DeleteConfirmButton, DeleteHandle, MemberList, NewTaskForm, ProjectEditForm, TaskList,
};
use crate::context::use_page_context;
use crate::store::{store_set_project, use_project_store, ProjectState, ProjectStateStoreFields, ProjectStore};

#[component]
pub fn ProjectDetailPage(id: Option<u32>) -> impl IntoView {
    let ctx = use_page_context();
    let store: ProjectStore = Store::new(ProjectState::default());
    provide_context(store);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let client = api::client();
            match load_page(&client, Route::Project(id)).await {
                LoadOutcome::Ready(PageData::Project(project)) => store_set_project(&store, project),
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

    view! {
        <div class="page project-page">
            <a class="back-link" href=Route::Index.href()>"← Projects"</a>
            {move || match store.mode().get() {
                ViewMode::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                ViewMode::Failed(message) => view! { <p class="page-error">{message}</p> }.into_any(),
                ViewMode::Removed => view! { <p class="removed">"Project deleted. Redirecting..."</p> }.into_any(),
                mode => match store.project().get() {
                    Some(project) => view! { <ProjectBody project=project editing=mode.is_editing() /> }.into_any(),
                    None => ().into_any(),
                },
            }}
        </div>
    }
}

#[component]
fn ProjectBody(project: Project, editing: bool) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_project_store();

    let project_id = project.id;
    let model = ProjectView::from_project(&project);
    let assignees = assignee_options(&project);

    let delete_project = move |handle: DeleteHandle| {
        spawn_local(async move {
            match api::client().delete_project(project_id).await {
                Ok(()) => {
                    store.mode().set(ViewMode::Removed);
                    ctx.info("Project deleted.");
                    Timeout::new(REDIRECT_AFTER_DELETE_MS, || api::navigate(Route::Index)).forget();
                }
                Err(e) => {
                    handle.failed();
                    ctx.fail(&e);
                }
            }
        });
    };

    let header = if editing {
        view! { <ProjectEditForm project=project /> }.into_any()
    } else {
        let card = model.card;
        view! {
            <section class="project-header">
                <h1>{card.title}</h1>
                <p class="project-description">{card.description}</p>
                <p class="project-due">"Due: " {card.due}</p>
                <p class="project-owner">"Owner: " {card.owner}</p>
                <div class="actions">
                    <button type="button" on:click=move |_| store.mode().update(|m| { m.begin_edit(); })>
                        "Edit"
                    </button>
                    <DeleteConfirmButton
                        label="Delete project"
                        button_class="danger-btn"
                        on_confirm=delete_project
                    />
                </div>
            </section>
        }
        .into_any()
    };

    view! {
        {header}
        <section class="members">
            <h2>"Members"</h2>
            <MemberList project_id=project_id members=model.members />
            <AddMemberForm project_id=project_id />
        </section>
        <section class="tasks">
            <TaskList title="Tasks" tasks=model.tasks />
            <NewTaskForm project_id=project_id assignees=assignees />
        </section>
    }
}
