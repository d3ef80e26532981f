//! Registration page; shares the login page's inline-error contract.

use leptos::prelude::*;
#[cfg(feature = "csr")]
use leptos_router::NavigateOptions;
#[cfg(feature = "csr")]
use leptos_router::hooks::use_navigate;

use crate::net::types::RegisterProfile;
use crate::state::session::SessionStore;
use crate::util::validate::validate_register;

/// Account creation form. A successful registration yields a live session
/// immediately; no separate login step.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<StoredValue<SessionStore, LocalStorage>>().get_value();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
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
        let profile = RegisterProfile {
            name: name.get().trim().to_owned(),
            email: email.get().trim().to_owned(),
            password: password.get(),
        };
        if let Err(problem) = validate_register(&profile.name, &profile.email, &profile.password) {
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
                let outcome = store.register(&profile).await;
                if outcome.success {
                    navigate("/dashboard", NavigateOptions::default());
                } else {
                    error.set(outcome.message.unwrap_or_else(|| "Registration failed.".to_owned()));
                    busy.set(false);
                }
            });
        }

        #[cfg(not(feature = "csr"))]
        {
            let _ = (&store, profile);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create your account"</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Full name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
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
                        placeholder="Password (8+ characters)"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Create Account"
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
