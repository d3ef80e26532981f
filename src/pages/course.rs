//! Course detail page with an enroll action.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::api;
use crate::net::client::ApiClient;
use crate::util::format::price_label;

/// Course detail — public to browse; enrolling requires a session, and an
/// expired one surfaces through the pipeline's forced re-authentication.
#[component]
pub fn CoursePage() -> impl IntoView {
    let client = expect_context::<StoredValue<ApiClient, LocalStorage>>();
    let params = use_params_map();
    let course_id = Memo::new(move |_| {
        params
            .get()
            .get("id")
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or_default()
    });

    let course = LocalResource::new(move || {
        let client = client.get_value();
        let id = course_id.get();
        async move { api::fetch_course(&client, id).await.ok() }
    });

    let notice = RwSignal::new(String::new());
    let enrolling = RwSignal::new(false);

    let on_enroll = {
        move || {
            if enrolling.get() {
                return;
            }
            enrolling.set(true);
            notice.set(String::new());

            #[cfg(feature = "csr")]
            {
                let client = client.get_value();
                let id = course_id.get();
                leptos::task::spawn_local(async move {
                    match api::enroll(&client, id).await {
                        Ok(_) => notice.set("Enrolled! Find it under My Learning.".to_owned()),
                        Err(error) => notice.set(error.to_string()),
                    }
                    enrolling.set(false);
                });
            }

            #[cfg(not(feature = "csr"))]
            {
                let _ = &client;
                enrolling.set(false);
            }
        }
    };

    view! {
        <div class="course-page">
            <Suspense fallback=move || view! { <p>"Loading course..."</p> }>
                {move || {
                    course
                        .get()
                        .map(|found| match found {
                            Some(course) => {
                                view! {
                                    <article class="course-page__body">
                                        <h1>{course.title}</h1>
                                        <p class="course-page__meta">
                                            {course.instructor.clone().unwrap_or_default()}
                                            " · "
                                            {price_label(course.price.as_deref())}
                                        </p>
                                        <p class="course-page__description">{course.description}</p>
                                        <button
                                            class="btn btn--primary"
                                            disabled=move || enrolling.get()
                                            on:click={
                                                let on_enroll = on_enroll.clone();
                                                move |_| on_enroll()
                                            }
                                        >
                                            "Enroll"
                                        </button>
                                    </article>
                                }
                                    .into_any()
                            }
                            None => view! { <p>"Course not found."</p> }.into_any(),
                        })
                }}
            </Suspense>
            <Show when=move || !notice.get().is_empty()>
                <p class="course-page__notice">{move || notice.get()}</p>
            </Show>
        </div>
    }
}
