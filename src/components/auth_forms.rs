//! Auth Forms
//!
//! Login and registration tabs shown on the index page when signed out.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskboard_core::forms::RegistrationForm;
use taskboard_core::routes::Route;

use crate::api;
use crate::context::use_page_context;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    Login,
    Register,
}

#[component]
pub fn AuthPanel() -> impl IntoView {
    let (tab, set_tab) = signal(AuthTab::Login);
    let tab_class = move |t: AuthTab| if tab.get() == t { "tab active" } else { "tab" };

    view! {
        <div class="auth-panel">
            <div class="tabs">
                <button type="button" class=move || tab_class(AuthTab::Login) on:click=move |_| set_tab.set(AuthTab::Login)>
                    "Sign in"
                </button>
                <button type="button" class=move || tab_class(AuthTab::Register) on:click=move |_| set_tab.set(AuthTab::Register)>
                    "Register"
                </button>
            </div>
            {move || match tab.get() {
                AuthTab::Login => view! { <LoginForm /> }.into_any(),
                AuthTab::Register => view! {
                    <RegisterForm on_registered=move |_| set_tab.set(AuthTab::Login) />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn LoginForm() -> impl IntoView {
    let ctx = use_page_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (pending, set_pending) = signal(false);

    let login = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let (email, password) = (email.get(), password.get());
        if email.trim().is_empty() || password.is_empty() {
            ctx.error("Enter your email and password.");
            return;
        }
        set_pending.set(true);

        spawn_local(async move {
            match api::client().login(&email, &password).await {
                Ok(_) => {
                    ctx.info("Signed in.");
                    api::navigate(Route::Index);
                }
                Err(e) => {
                    ctx.error(e.to_string());
                    set_pending.set(false);
                }
            }
        });
    };

    view! {
        <form class="auth-form" on:submit=login>
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Sign in"</button>
        </form>
    }
}

#[component]
fn RegisterForm(#[prop(into)] on_registered: Callback<()>) -> impl IntoView {
    let ctx = use_page_context();

    let form = RwSignal::new(RegistrationForm::default());
    let (pending, set_pending) = signal(false);

    let register = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get() {
            return;
        }
        let registration = match form.get().to_registration() {
            Ok(registration) => registration,
            Err(e) => {
                ctx.error(e.to_string());
                return;
            }
        };
        set_pending.set(true);

        spawn_local(async move {
            match api::client().register(&registration).await {
                Ok(_) => {
                    form.set(RegistrationForm::default());
                    ctx.info("Registration successful. Please sign in.");
                    on_registered.run(());
                }
                Err(e) => ctx.fail(&e),
            }
            set_pending.set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=register>
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
            <input
                type="email"
                placeholder="Email"
                prop:value=move || form.with(|f| f.email.clone())
                on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Position (optional)"
                prop:value=move || form.with(|f| f.position.clone())
                on:input=move |ev| form.update(|f| f.position = event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password (8+ characters)"
                prop:value=move || form.with(|f| f.password.clone())
                on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
            />
            <button type="submit" disabled=move || pending.get()>"Register"</button>
        </form>
    }
}
