//! Authenticated dashboard listing the user's enrollments.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format::progress_label;

/// Dashboard page — shows enrolled courses with progress.
/// Redirects to `/login` once auth has loaded with no user.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let client = expect_context::<StoredValue<ApiClient, LocalStorage>>().get_value();
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate);

    let enrollments = LocalResource::new(move || {
        let client = client.clone();
        async move { api::fetch_enrollments(&client).await.unwrap_or_default() }
    });

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"My Learning"</h1>
                <p class="dashboard-page__greeting">
                    {move || {
                        auth.get()
                            .user
                            .map(|u| format!("Welcome back, {}", u.name))
                            .unwrap_or_default()
                    }}
                </p>
            </header>
            <Suspense fallback=move || view! { <p>"Loading your courses..."</p> }>
                {move || {
                    enrollments
                        .get()
                        .map(|rows| {
                            if rows.is_empty() {
                                view! {
                                    <p class="dashboard-page__empty">
                                        "You are not enrolled in any courses yet. "
                                        <a href="/">"Browse the catalog"</a>
                                    </p>
                                }
                                    .into_any()
                            } else {
                                view! {
                                    <ul class="dashboard-page__list">
                                        {rows
                                            .into_iter()
                                            .map(|row| {
                                                let href = format!("/courses/{}", row.course.id);
                                                view! {
                                                    <li class="enrollment-row">
                                                        <a href=href>{row.course.title}</a>
                                                        <span class="enrollment-row__progress">
                                                            {progress_label(row.progress)}
                                                        </span>
                                                    </li>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </ul>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
