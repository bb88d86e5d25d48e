//! Member List Component
//!
//! Project members with the owner tagged; everyone but the owner can be
//! removed with a two-step confirm.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::routes::Route;
use taskboard_core::view::MemberEntry;

use crate::api;
use crate::components::{DeleteConfirmButton, DeleteHandle};
use crate::context::use_page_context;

#[component]
pub fn MemberList(project_id: u32, members: Vec<MemberEntry>) -> impl IntoView {
    let ctx = use_page_context();

    if members.is_empty() {
        return view! { <p class="empty">"No members yet."</p> }.into_any();
    }

    view! {
        <ul class="member-list">
            {members.into_iter().map(|member| {
                let user_id = member.id;
                let remove = move |handle: DeleteHandle| {
                    spawn_local(async move {
                        match api::client().remove_member(project_id, user_id).await {
                            Ok(()) => {
                                ctx.info("Member removed.");
                                ctx.reload();
                            }
                            Err(e) => {
                                handle.failed();
                                ctx.fail(&e);
                            }
                        }
                    });
                };
                view! {
                    <li class="member-item">
                        <a href=Route::User(Some(user_id)).href()>{member.name.clone()}</a>
                        <span class="member-email">{member.email.clone()}</span>
                        {member.tag().map(|tag| view! { <span class="member-tag">{tag}</span> })}
                        {member.removable().then(|| view! {
                            <DeleteConfirmButton
                                label="Remove"
                                button_class="member-remove-btn"
                                on_confirm=remove
                            />
                        })}
                    </li>
                }
            }).collect_view()}
        </ul>
    }
    .into_any()
}
