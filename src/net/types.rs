//! Wire DTOs for the e-learning REST backend.
//!
//! DESIGN
//! ======
//! These mirror the PHP API's JSON payloads so serde round-trips stay
//! lossless. Unknown enum values are tolerated (`Role::Unknown`) because the
//! backend owns the vocabulary and adds roles without versioning.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Role discriminator on the authenticated principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Instructor,
    Student,
    /// Any role this client build does not know about.
    #[serde(other)]
    Unknown,
}

impl Default for Role {
    fn default() -> Self {
        Self::Student
    }
}

/// The authenticated principal as returned by `/auth/verify` and login.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Avatar image URL, when the user has uploaded one.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Successful login/register response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Registration form payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterProfile {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A catalog course summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Display price as the server formats it; amounts are server-owned.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub lesson_count: Option<u32>,
}

/// An enrollment row for the authenticated user's dashboard.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course: Course,
    /// Completion fraction 0.0–1.0 as reported by the server.
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub enrolled_at: Option<String>,
}

/// A quiz attached to a course, questions included.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QuizQuestion {
    pub id: i64,
    pub prompt: String,
    #[serde(default)]
    pub choices: Vec<String>,
}

/// One selected choice in a quiz submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizAnswer {
    pub question_id: i64,
    /// Index into the question's `choices`.
    pub choice: u32,
}

/// Server-graded quiz outcome. Grading rules are server-owned; the client
/// only displays the result.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QuizResult {
    pub score: f64,
    pub total: f64,
    #[serde(default)]
    pub passed: Option<bool>,
}
