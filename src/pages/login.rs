//! Login page with inline error rendering and remembered email.

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionStore;
use crate::util::validate::validate_login;

/// Login page — posts credentials through the session store and renders
/// failures inline next to the form, never as a thrown error.
#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<StoredValue<SessionStore, LocalStorage>>().get_value();

    let email = RwSignal::new(store.remembered_email().unwrap_or_default());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if let Err(problem) = validate_login(&email_value, &password_value) {
            error.set(problem);
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "csr")]
        {
            let store = store.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let outcome = store.login(&email_value, &password_value).await;
                if outcome.success {
                    navigate("/dashboard", NavigateOptions::default());
                } else {
                    error.set(outcome.message.unwrap_or_else(|| "Sign in failed.".to_owned()));
                    busy.set(false);
                }
            });
        }

        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, email_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"CourseDeck"</h1>
                <p class="login-card__subtitle">"Sign in to continue learning"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "New here? "
                    <a href="/register">"Create an account"</a>
                </p>
            </div>
        </div>
    }
}
