//! Users Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use taskboard_core::page::{load_page, LoadOutcome, PageData, ViewMode};
use taskboard_core::routes::Route;
use taskboard_core::view::UserRow;

use crate::api;
use crate::context::use_page_context;
use crate::store::{UsersState, UsersStateStoreFields, UsersStore};

#[component]
pub fn UsersPage() -> impl IntoView {
    let ctx = use_page_context();
    let store: UsersStore = Store::new(UsersState::default());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let client = api::client();
            match load_page(&client, Route::Users).await {
                LoadOutcome::Ready(PageData::Users(users)) => {
                    store.users().set(users);
                    store.mode().set(ViewMode::Viewing);
                }
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
        <div class="page users-page">
            <a class="back-link" href=Route::Index.href()>"← Projects"</a>
            <h1>"Users"</h1>
            {move || match store.mode().get() {
                ViewMode::Loading => view! { <p class="loading">"Loading..."</p> }.into_any(),
                ViewMode::Failed(message) => view! { <p class="page-error">{message}</p> }.into_any(),
                _ => view! {
                    <table class="users-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th>"Role"</th>
                                <th>"Position"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || store.users().get()
                                key=|user| user.id
                                children=move |user| {
                                    let row = UserRow::from_user(&user);
                                    view! {
                                        <tr>
                                            <td><a href=Route::User(Some(row.id)).href()>{row.name}</a></td>
                                            <td>{row.email}</td>
                                            <td>{row.role}</td>
                                            <td>{row.position}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }.into_any(),
            }}
        </div>
    }
}
