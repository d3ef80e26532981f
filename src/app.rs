//! Root application component: wiring, context providers, and routing.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the composition root for the request pipeline and the session
//! store: real transport/storage in the browser, inert stand-ins elsewhere,
//! the session-expiry hook wired to the same cleanup logout uses, and the
//! one startup verification call.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::net::client::ApiClient;
use crate::net::transport::Transport;
use crate::pages::{
    catalog::CatalogPage, course::CoursePage, dashboard::DashboardPage, login::LoginPage,
    register::RegisterPage,
};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::state::storage::TokenStorage;
use crate::util::navigation::force_reauthenticate;

/// Root application component.
///
/// Builds the pipeline + session store once, provides them (and the mirrored
/// reactive auth state) as contexts, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    #[cfg(feature = "csr")]
    let transport: Rc<dyn Transport> = Rc::new(crate::net::transport::FetchTransport);
    #[cfg(not(feature = "csr"))]
    let transport: Rc<dyn Transport> = Rc::new(crate::net::transport::NullTransport);

    #[cfg(feature = "csr")]
    let storage: Rc<dyn TokenStorage> = Rc::new(crate::state::storage::BrowserStorage);
    #[cfg(not(feature = "csr"))]
    let storage: Rc<dyn TokenStorage> = Rc::new(crate::state::storage::MemoryStorage::new());

    let client = ApiClient::new(transport);
    let store = SessionStore::new(client.clone(), Rc::clone(&storage));

    // Expired session on any protected call: an explicit logout (storage,
    // bearer slot, and in-memory state together), then a full-page reset to
    // /login. Clearing state matters even without the navigation: when the
    // 401 arrives while already on /login no reload happens, and a stale
    // user must not survive in the store.
    {
        let hook_store = store.clone();
        client.set_session_expired_hook(move || {
            hook_store.logout();
            force_reauthenticate();
        });
    }

    // Mirror store snapshots into a reactive signal for components.
    let auth = RwSignal::new(AuthState::from(&store.snapshot()));
    store.subscribe(move |session| auth.set(AuthState::from(session)));

    provide_context(StoredValue::new_local(client.clone()));
    provide_context(StoredValue::new_local(store.clone()));
    provide_context(auth);

    // Startup: best-effort CSRF bootstrap, then the single verify call.
    #[cfg(feature = "csr")]
    {
        let boot_client = client.clone();
        let boot_store = store.clone();
        leptos::task::spawn_local(async move {
            let _ = crate::net::api::bootstrap_csrf(&boot_client).await;
            boot_store.initialize().await;
        });
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/coursedeck.css"/>
        <Title text="CourseDeck"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=CatalogPage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=(StaticSegment("courses"), ParamSegment("id")) view=CoursePage/>
                </Routes>
            </main>
        </Router>
    }
}
