//! Taskboard Frontend App
//!
//! Picks the page for the current URL and provides its context.

use leptos::prelude::*;
use taskboard_core::routes::Route;
use taskboard_core::ValidationError;

use crate::api;
use crate::components::StatusBar;
use crate::context::PageContext;
use crate::pages::{ProjectDetailPage, ProjectsPage, TaskDetailPage, UserDetailPage, UsersPage};

#[component]
pub fn App() -> impl IntoView {
    let route = api::current_route();
    log::info!("[APP] mounting {:?}", route);

    // Provide context to the page and its children
    provide_context(PageContext::new());

    let page = match route {
        Route::Index => view! { <ProjectsPage /> }.into_any(),
        Route::Project(id) => view! { <ProjectDetailPage id=id /> }.into_any(),
        Route::Task(id) => view! { <TaskDetailPage id=id /> }.into_any(),
        Route::User(id) => view! { <UserDetailPage id=id /> }.into_any(),
        Route::Users => view! { <UsersPage /> }.into_any(),
        Route::InvalidId(entity) => {
            let message = ValidationError::InvalidId(entity).to_string();
            log::warn!("[APP] {}", message);
            view! { <p class="page-error">{message}</p> }.into_any()
        }
    };

    view! {
        <div class="app-layout">
            <nav class="top-nav">
                <a href=Route::Index.href()>"Projects"</a>
                <a href=Route::Users.href()>"Users"</a>
                <a href=Route::User(None).href()>"My profile"</a>
            </nav>
            <StatusBar />
            <main class="main-content">{page}</main>
        </div>
    }
}
