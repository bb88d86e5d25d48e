//! Edit User Modal
//!
//! Name fields for everyone; position and role only for admins.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::ProfileForm;
use taskboard_core::models::{UserRef, ASSIGNABLE_ROLES};

use crate::api;
use crate::context::use_page_context;
use crate::store::{store_set_profile, use_profile_store, ProfileStateStoreFields};

#[component]
pub fn EditUserModal(user: UserRef, is_admin: bool) -> impl IntoView {
    let ctx = use_page_context();
    let store = use_profile_store();

    let form = RwSignal::new(ProfileForm::from_user(&user));
    let (pending, set_pending) = signal(false);
    let user_id = user.id;

    let close = move || store.mode().update(|m| m.end_edit());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let patch = match form.get().to_patch(is_admin) {
            Ok(patch) => patch,
            Err(e) => {
                ctx.error(e.to_string());
                return;
            }
        };
        set_pending.set(true);

        spawn_local(async move {
            match api::client().update_user(user_id, &patch).await {
                Ok(saved) => {
                    store_set_profile(&store, saved);
                    ctx.info("Profile updated.");
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| close()>
            <form class="modal" on:submit=save on:click=|ev| ev.stop_propagation()>
                <h2>"Edit profile"</h2>
                <input
                    type="text"
                    placeholder="First name"
                    prop:value=move || form.with(|f| f.first_name.clone())
                    on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Last name"
                    prop:value=move || form.with(|f| f.last_name.clone())
                    on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                />
                {is_admin.then(|| view! {
                    <input
                        type="text"
                        placeholder="Position"
                        prop:value=move || form.with(|f| f.position.clone())
                        on:input=move |ev| form.update(|f| f.position = event_target_value(&ev))
                    />
                    <select
                        prop:value=move || form.with(|f| f.role.clone())
                        on:change=move |ev| form.update(|f| f.role = event_target_value(&ev))
                    >
                        <option value="">"— Keep role —"</option>
                        {ASSIGNABLE_ROLES.iter().map(|r| view! {
                            <option value=r.as_str()>{r.label()}</option>
                        }).collect_view()}
                    </select>
                })}
                <div class="actions">
                    <button type="submit" disabled=move || pending.get()>"Save"</button>
                    <button type="button" on:click=move |_| close()>"Cancel"</button>
                </div>
            </form>
        </div>
    }
}
