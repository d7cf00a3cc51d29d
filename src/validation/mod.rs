//! Declarative per-field checks run against raw request bodies before any
//! mutation. Violations are collected, never short-circuited, so a caller
//! sees every problem in one 422 response.

use serde::Serialize;

use crate::database::models::{ProfileUpdate, Registration};

pub const USERNAME_MIN_LEN: usize = 5;
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Rules for `POST /users`: username, password, and email are all checked.
pub fn registration_errors(body: &Registration) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_username(body.username.as_deref(), &mut errors);
    check_password(body.password.as_deref(), &mut errors);
    check_email(body.email.as_deref(), &mut errors);
    errors
}

/// Rules for `PUT /users/:Username`: same username and email rules, no
/// password rule since the credential is not updatable here.
pub fn profile_update_errors(body: &ProfileUpdate) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_username(body.username.as_deref(), &mut errors);
    check_email(body.email.as_deref(), &mut errors);
    errors
}

fn check_username(value: Option<&str>, errors: &mut Vec<FieldError>) {
    let Some(username) = value else {
        errors.push(FieldError::new("Username", "Username is required"));
        return;
    };

    if username.chars().count() < USERNAME_MIN_LEN {
        errors.push(FieldError::new(
            "Username",
            format!("Username must be at least {} characters long", USERNAME_MIN_LEN),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(
            "Username",
            "Username may only contain alphanumeric characters",
        ));
    }
}

fn check_password(value: Option<&str>, errors: &mut Vec<FieldError>) {
    let Some(password) = value else {
        errors.push(FieldError::new("Password", "Password is required"));
        return;
    };

    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(FieldError::new(
            "Password",
            format!("Password must be at least {} characters long", PASSWORD_MIN_LEN),
        ));
    }
}

fn check_email(value: Option<&str>, errors: &mut Vec<FieldError>) {
    let Some(email) = value else {
        errors.push(FieldError::new("Email", "Email is required"));
        return;
    };

    if !is_valid_email(email) {
        errors.push(FieldError::new(
            "Email",
            "Email does not appear to be valid",
        ));
    }
}

/// Structural email check: non-empty local part, a domain with at least one
/// dot-separated label of two or more characters, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || domain.contains("..") {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.chars().count() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(username: Option<&str>, password: Option<&str>, email: Option<&str>) -> Registration {
        Registration {
            username: username.map(String::from),
            password: password.map(String::from),
            email: email.map(String::from),
            birthday: None,
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_registration_has_no_errors() {
        let body = registration(Some("kate1"), Some("secret1"), Some("kate@x.com"));
        assert!(registration_errors(&body).is_empty());
    }

    #[test]
    fn test_short_username_rejected() {
        let body = registration(Some("kate"), Some("secret1"), Some("kate@x.com"));
        let errors = registration_errors(&body);
        assert_eq!(fields(&errors), vec!["Username"]);
        assert!(errors[0].message.contains("at least 5"));
    }

    #[test]
    fn test_non_alphanumeric_username_rejected() {
        let body = registration(Some("kate_1!"), Some("secret1"), Some("kate@x.com"));
        assert_eq!(fields(&registration_errors(&body)), vec!["Username"]);
    }

    #[test]
    fn test_short_and_symbolic_username_collects_both_rule_violations() {
        let body = registration(Some("k!"), Some("secret1"), Some("kate@x.com"));
        let errors = registration_errors(&body);
        assert_eq!(fields(&errors), vec!["Username", "Username"]);
    }

    #[test]
    fn test_short_password_rejected() {
        let body = registration(Some("kate1"), Some("five5"), Some("kate@x.com"));
        assert_eq!(fields(&registration_errors(&body)), vec!["Password"]);
    }

    #[test]
    fn test_all_violations_collected() {
        let body = registration(None, None, Some("not-an-email"));
        let errors = registration_errors(&body);
        assert_eq!(fields(&errors), vec!["Username", "Password", "Email"]);
    }

    #[test]
    fn test_profile_update_skips_password_rule() {
        let body = ProfileUpdate {
            username: Some("kate1".to_string()),
            email: Some("kate@x.com".to_string()),
            birthday: None,
        };
        assert!(profile_update_errors(&body).is_empty());

        let body = ProfileUpdate {
            username: None,
            email: None,
            birthday: None,
        };
        assert_eq!(fields(&profile_update_errors(&body)), vec!["Username", "Email"]);
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("kate@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("kate"));
        assert!(!is_valid_email("kate@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("kate@x"));
        assert!(!is_valid_email("kate@x..com"));
        assert!(!is_valid_email("kate smith@x.com"));
        assert!(!is_valid_email("kate@x.c"));
    }
}
