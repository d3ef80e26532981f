//! Catalog card for a single course.

use leptos::prelude::*;

use crate::util::format::price_label;

/// Course summary card linking to the course detail page.
#[component]
pub fn CourseCard(
    id: i64,
    title: String,
    #[prop(optional_no_strip)] instructor: Option<String>,
    #[prop(optional_no_strip)] price: Option<String>,
) -> impl IntoView {
    let href = format!("/courses/{id}");
    let price_text = price_label(price.as_deref());

    view! {
        <a class="course-card" href=href>
            <h3 class="course-card__title">{title}</h3>
            <Show when={
                let instructor = instructor.clone();
                move || instructor.is_some()
            }>
                <p class="course-card__instructor">{instructor.clone().unwrap_or_default()}</p>
            </Show>
            <span class="course-card__price">{price_text}</span>
        </a>
    }
}
