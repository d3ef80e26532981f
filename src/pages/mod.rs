//! Route-level page components.

pub mod catalog;
pub mod course;
pub mod dashboard;
pub mod login;
pub mod register;
