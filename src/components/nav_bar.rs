//! Top navigation bar with auth-aware actions.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthState;
use crate::state::session::SessionStore;

/// Site header: catalog link always, dashboard + logout when signed in,
/// login link otherwise.
#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let store = expect_context::<StoredValue<SessionStore, LocalStorage>>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        store.get_value().logout();
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <header class="nav-bar">
            <a class="nav-bar__brand" href="/">"CourseDeck"</a>
            <nav class="nav-bar__links">
                <a href="/">"Catalog"</a>
                <Show when=move || auth.get().user.is_some()>
                    <a href="/dashboard">"My Learning"</a>
                </Show>
            </nav>
            <div class="nav-bar__session">
                <Show
                    when=move || auth.get().user.is_some()
                    fallback=|| view! { <a class="nav-bar__login" href="/login">"Sign In"</a> }
                >
                    <span class="nav-bar__user">
                        {move || auth.get().user.map(|u| u.name).unwrap_or_default()}
                    </span>
                    <button class="nav-bar__logout" on:click=on_logout.clone()>
                        "Sign Out"
                    </button>
                </Show>
            </div>
        </header>
    }
}
