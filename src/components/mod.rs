//! Reusable view components.

pub mod course_card;
pub mod nav_bar;
