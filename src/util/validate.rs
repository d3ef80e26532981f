//! Form input validation shared by the login and register pages.
//!
//! Server-side validation is authoritative; these checks only catch the
//! obviously empty/malformed cases before a round trip.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Minimal email shape check: something before and after a single `@`.
pub fn looks_like_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

/// Validate the login form; returns the first problem found.
pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if !looks_like_email(email) {
        return Err("Enter a valid email address.".to_owned());
    }
    if password.is_empty() {
        return Err("Enter your password.".to_owned());
    }
    Ok(())
}

/// Validate the registration form; returns the first problem found.
pub fn validate_register(name: &str, email: &str, password: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Enter your name.".to_owned());
    }
    if !looks_like_email(email) {
        return Err("Enter a valid email address.".to_owned());
    }
    if password.chars().count() < 8 {
        return Err("Password must be at least 8 characters.".to_owned());
    }
    Ok(())
}
