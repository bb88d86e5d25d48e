//! Projects Page
//!
//! Index page: the project list when signed in, login/register otherwise.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::page::{load_page, LoadOutcome, PageData};
use taskboard_core::routes::Route;
use taskboard_core::view::ProjectCard;

use crate::api;
use crate::components::{AuthPanel, NewProjectModal};
use crate::context::use_page_context;
use crate::store::{ProjectsState, ProjectsStateStoreFields, ProjectsStore};

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_page_context();
    let store: ProjectsStore = Store::new(ProjectsState {
        loading: true,
        ..Default::default()
    });
    provide_context(store);
    let show_new_project = RwSignal::new(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let client = api::client();
            match load_page(&client, Route::Index).await {
                LoadOutcome::Ready(PageData::Projects(projects)) => {
                    log::info!("[PROJECTS] loaded {} projects", projects.len());
                    store.projects().set(projects);
                    store.signed_in().set(true);
                }
                LoadOutcome::Ready(_) => {}
                LoadOutcome::RedirectToLogin => store.signed_in().set(false),
                LoadOutcome::Failed(message) => {
                    store.signed_in().set(true);
                    ctx.error(message);
                }
            }
            store.loading().set(false);
        });
    });

    let logout = move |_: web_sys::MouseEvent| {
        api::client().logout();
        store.projects().set(Vec::new());
        store.signed_in().set(false);
        ctx.info("Signed out.");
    };

    let open_profile = move |_: web_sys::MouseEvent| {
        let client = api::client();
        match client.session().identity().id {
            Some(id) => api::navigate(Route::User(Some(id))),
            None => {
                client.logout();
                store.signed_in().set(false);
                ctx.error("Could not determine the signed-in user. Please sign in again.");
            }
        }
    };

    view! {
        <div class="page projects-page">
            {move || {
                if store.loading().get() {
                    view! { <p class="loading">"Loading..."</p> }.into_any()
                } else if !store.signed_in().get() {
                    view! { <AuthPanel /> }.into_any()
                } else {
                    view! {
                        <header class="page-header">
                            <h1>"Projects"</h1>
                            <div class="actions">
                                <button type="button" on:click=move |_| show_new_project.set(true)>"New project"</button>
                                <button type="button" on:click=open_profile>"My profile"</button>
                                <button type="button" on:click=logout>"Sign out"</button>
                            </div>
                        </header>
                        <ProjectCards />
                    }.into_any()
                }
            }}
            <NewProjectModal open=show_new_project />
        </div>
    }
}

#[component]
fn ProjectCards() -> impl IntoView {
    let store = expect_context::<ProjectsStore>();

    view! {
        <Show
            when=move || !store.projects().read().is_empty()
            fallback=|| view! { <p class="empty">"No projects yet."</p> }
        >
            <div class="project-grid">
                <For
                    each=move || store.projects().get()
                    key=|project| project.id
                    children=move |project| {
                        let card = ProjectCard::from_project(&project);
                        view! {
                            <a class="project-card" href=Route::Project(Some(card.id)).href()>
                                <h3>{card.title}</h3>
                                <span class="project-id">{format!("#{}", card.id)}</span>
                                <p>{card.description}</p>
                                <p class="project-due">"Due: " {card.due}</p>
                                <p class="project-owner">"Owner: " {card.owner}</p>
                            </a>
                        }
                    }
                />
            </div>
        </Show>
    }
}
