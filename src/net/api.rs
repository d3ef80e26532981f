//! Typed endpoint wrappers over the request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! One function per consumed REST endpoint, each declaring its auth scope at
//! the call site: public endpoints (catalog, CSRF bootstrap, probes, the
//! startup verify) tag requests so a 401 there is an ordinary error rather
//! than a session-expiry event.
//!
//! ERROR HANDLING
//! ==============
//! Everything returns `Result<_, ApiError>`; pages decide whether a failure
//! is a toast, an inline message, or a silent degrade.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;

use super::client::{ApiClient, RequestOptions};
use super::error::ApiError;
use super::types::{AuthPayload, Course, Enrollment, Quiz, QuizAnswer, QuizResult, RegisterProfile, User};

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: User,
}

/// Validate the installed bearer token and fetch the current user.
///
/// Tagged public: its 401 is owned by the session store's startup path, not
/// the pipeline's expiry hook.
///
/// # Errors
///
/// Any pipeline failure; a 401 here means the stored token is no longer
/// accepted.
pub async fn verify(client: &ApiClient) -> Result<User, ApiError> {
    let response = client.get("/auth/verify", RequestOptions::public()).await?;
    let body: VerifyResponse = response.json()?;
    Ok(body.user)
}

/// Exchange credentials for a token + user via `POST /auth/login`.
///
/// # Errors
///
/// 401 with a server message for bad credentials; any other pipeline failure.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = client
        .post("/auth/login", Some(body), RequestOptions::public())
        .await?;
    response.json()
}

/// Create an account via `POST /auth/register`; returns a fresh session.
///
/// # Errors
///
/// 422 with field-level detail for invalid input; any other pipeline failure.
pub async fn register(client: &ApiClient, profile: &RegisterProfile) -> Result<AuthPayload, ApiError> {
    let body = serde_json::to_value(profile).map_err(|e| ApiError::Decode(e.to_string()))?;
    let response = client
        .post("/auth/register", Some(body), RequestOptions::public())
        .await?;
    response.json()
}

/// Bootstrap a CSRF token via `GET /auth/csrf-token.php`.
///
/// The pipeline captures the token from the response body; callers only need
/// to know the call happened.
///
/// # Errors
///
/// Any pipeline failure. Best-effort: mutating calls are legal before this
/// succeeds.
pub async fn bootstrap_csrf(client: &ApiClient) -> Result<(), ApiError> {
    client.get("/auth/csrf-token.php", RequestOptions::public()).await?;
    Ok(())
}

/// Connectivity probe against `GET /health.php`.
///
/// # Errors
///
/// `ApiError::Connectivity` when the backend is unreachable.
pub async fn ping(client: &ApiClient) -> Result<(), ApiError> {
    client.get("/health.php", RequestOptions::public()).await?;
    Ok(())
}

/// Fetch the public course catalog.
///
/// # Errors
///
/// Any pipeline failure.
pub async fn fetch_courses(client: &ApiClient) -> Result<Vec<Course>, ApiError> {
    let response = client.get("/courses/index.php", RequestOptions::public()).await?;
    response.json()
}

/// Fetch one course by id.
///
/// # Errors
///
/// 404 when the course does not exist; any other pipeline failure.
pub async fn fetch_course(client: &ApiClient, course_id: i64) -> Result<Course, ApiError> {
    let options = RequestOptions {
        query: vec![("id".to_owned(), course_id.to_string())],
        ..RequestOptions::public()
    };
    let response = client.get("/courses/view.php", options).await?;
    response.json()
}

/// Fetch the authenticated user's enrollments.
///
/// # Errors
///
/// Any pipeline failure; 401 here triggers the session-expiry path.
pub async fn fetch_enrollments(client: &ApiClient) -> Result<Vec<Enrollment>, ApiError> {
    let response = client
        .get("/enrollments/index.php", RequestOptions::default())
        .await?;
    response.json()
}

/// Enroll the authenticated user in a course.
///
/// # Errors
///
/// Any pipeline failure; payment-gated courses answer 403 with a message.
pub async fn enroll(client: &ApiClient, course_id: i64) -> Result<Enrollment, ApiError> {
    let body = serde_json::json!({ "course_id": course_id });
    let response = client
        .post("/enrollments/create.php", Some(body), RequestOptions::default())
        .await?;
    response.json()
}

/// Fetch a quiz with its questions.
///
/// # Errors
///
/// Any pipeline failure.
pub async fn fetch_quiz(client: &ApiClient, quiz_id: i64) -> Result<Quiz, ApiError> {
    let options = RequestOptions {
        query: vec![("id".to_owned(), quiz_id.to_string())],
        ..RequestOptions::default()
    };
    let response = client.get("/quizzes/view.php", options).await?;
    response.json()
}

/// Submit quiz answers for server-side grading.
///
/// # Errors
///
/// Any pipeline failure.
pub async fn submit_quiz(
    client: &ApiClient,
    quiz_id: i64,
    answers: &[QuizAnswer],
) -> Result<QuizResult, ApiError> {
    let body = serde_json::json!({ "quiz_id": quiz_id, "answers": answers });
    let response = client
        .post("/quizzes/submit.php", Some(body), RequestOptions::default())
        .await?;
    response.json()
}

/// Update the authenticated user's profile fields.
///
/// # Errors
///
/// 422 with field-level detail for invalid input; any other pipeline failure.
pub async fn update_profile(client: &ApiClient, name: &str, email: &str) -> Result<User, ApiError> {
    let body = serde_json::json!({ "name": name, "email": email });
    let response = client
        .put("/users/profile.php", Some(body), RequestOptions::default())
        .await?;
    response.json()
}

/// Upload a new avatar image, reporting fractional progress.
///
/// # Errors
///
/// Any pipeline failure.
#[cfg(feature = "csr")]
pub async fn upload_avatar(
    client: &ApiClient,
    form: web_sys::FormData,
    on_progress: impl Fn(f64) + 'static,
) -> Result<User, ApiError> {
    let body = super::upload::upload(client, "/users/avatar.php", form, on_progress).await?;
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}
