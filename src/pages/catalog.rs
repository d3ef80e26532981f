//! Public course catalog, browsable without a session.

use leptos::prelude::*;

use crate::components::course_card::CourseCard;
use crate::net::api;
use crate::net::client::ApiClient;

/// Catalog page — lists every published course. Failures degrade to an
/// empty grid; a 401 here never touches the session (public endpoint).
#[component]
pub fn CatalogPage() -> impl IntoView {
    let client = expect_context::<StoredValue<ApiClient, LocalStorage>>().get_value();

    let courses = LocalResource::new(move || {
        let client = client.clone();
        async move { api::fetch_courses(&client).await.unwrap_or_default() }
    });

    view! {
        <div class="catalog-page">
            <header class="catalog-page__header">
                <h1>"Course Catalog"</h1>
            </header>
            <Suspense fallback=move || view! { <p>"Loading courses..."</p> }>
                {move || {
                    courses
                        .get()
                        .map(|list| {
                            if list.is_empty() {
                                view! { <p class="catalog-page__empty">"No courses published yet."</p> }
                                    .into_any()
                            } else {
                                view! {
                                    <div class="catalog-page__grid">
                                        {list
                                            .into_iter()
                                            .map(|course| {
                                                view! {
                                                    <CourseCard
                                                        id=course.id
                                                        title=course.title
                                                        instructor=course.instructor
                                                        price=course.price
                                                    />
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </div>
    }
}
