//! User Detail Page
//!
//! Profile, owned projects and assigned tasks. Editable by the user
//! themself or by an admin.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::models::UserProfile;
use taskboard_core::page::{load_page, LoadOutcome, PageData, ViewMode};
use taskboard_core::routes::Route;
use taskboard_core::view::{can_edit_profile, ProfileView};

use crate::api;
use crate::components::{EditUserModal, TaskList};
use crate::context::use_page_context;
use crate::store::{store_set_profile, use_profile_store, ProfileState, ProfileStateStoreFields, ProfileStore};

#[component]
pub fn UserDetailPage(id: Option<u32>) -> impl IntoView {
    let ctx = use_page_context();
    let store: ProfileStore = Store::new(ProfileState::default());
    provide_context(store);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let client = api::client();
            match load_page(&client, Route::User(id)).await {
                LoadOutcome::Ready(PageData::User(profile)) => store_set_profile(&store, profile),
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
        <div class="page user-page">
            <a class="back-link" href=Route::Users.href()>"← Users"</a>
            {move || match store.mode().get() {
                ViewMode::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                ViewMode::Failed(message) => view! { <p class="page-error">{message}</p> }.into_any(),
                ViewMode::Removed => ().into_any(),
                mode => match store.profile().get() {
                    Some(profile) => view! { <ProfileBody profile=profile editing=mode.is_editing() /> }.into_any(),
                    None => ().into_any(),
                },
            }}
        </div>
    }
}

#[component]
fn ProfileBody(profile: UserProfile, editing: bool) -> impl IntoView {
    let store = use_profile_store();

    let identity = api::client().session().identity();
    let can_edit = can_edit_profile(&identity, profile.user.id);
    let is_admin = identity.is_admin();
    let model = ProfileView::from_profile(&profile);

    view! {
        <section class="profile">
            <h1>{model.name}</h1>
            <dl>
                <dt>"Email"</dt>
                <dd>{model.email}</dd>
                <dt>"Role"</dt>
                <dd>{model.role}</dd>
                <dt>"Position"</dt>
                <dd>{model.position}</dd>
                <dt>"Status"</dt>
                <dd>{if model.active { "Active" } else { "Inactive" }}</dd>
                <dt>"Tasks"</dt>
                <dd>{model.task_count}</dd>
            </dl>
            {can_edit.then(|| view! {
                <button type="button" on:click=move |_| store.mode().update(|m| { m.begin_edit(); })>
                    "Edit profile"
                </button>
            })}
        </section>
        <section class="owned-projects">
            <h2>"Owned projects"</h2>
            {if model.owned_projects.is_empty() {
                view! { <p class="empty">"No projects."</p> }.into_any()
            } else {
                view! {
                    <ul>
                        {model.owned_projects.into_iter().map(|p| view! {
                            <li><a href=Route::Project(Some(p.id)).href()>{p.title}</a></li>
                        }).collect_view()}
                    </ul>
                }.into_any()
            }}
        </section>
        <section class="assigned-tasks">
            <TaskList title="Assigned tasks" tasks=model.tasks />
        </section>
        {(editing && can_edit).then(|| view! { <EditUserModal user=profile.user.clone() is_admin=is_admin /> })}
    }
}
