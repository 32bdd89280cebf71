//! Field rules shared by the services, with the messages clients see.

use validator::ValidateEmail;

use crate::domain::FieldErrors;

pub const BLANK: &str = "This field may not be blank.";
pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub const USERNAME_MAX: usize = 150;
pub const NAME_MAX: usize = 150;
pub const EMAIL_MAX: usize = 254;
pub const TITLE_MAX: usize = 200;
pub const PROJECT_NAME_MAX: usize = 200;

pub fn max_length(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

pub fn invalid_pk(id: i32) -> String {
    format!("Invalid pk \"{}\" - object does not exist.", id)
}

/// Non-blank text no longer than `max` characters.
pub fn check_text(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.add(field, BLANK);
    } else {
        check_len(errors, field, value, max);
    }
}

pub fn check_len(errors: &mut FieldErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(field, max_length(max));
    }
}

pub fn check_username(errors: &mut FieldErrors, username: &str) {
    if username.is_empty() {
        errors.add("username", BLANK);
        return;
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if !username.chars().all(allowed) {
        errors.add("username", INVALID_USERNAME);
    }
    check_len(errors, "username", username, USERNAME_MAX);
}

/// Email may be blank; anything else must parse as an address.
pub fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        return;
    }
    if !email.validate_email() {
        errors.add("email", INVALID_EMAIL);
    }
    check_len(errors, "email", email, EMAIL_MAX);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_charset() {
        let mut errors = FieldErrors::new();
        check_username(&mut errors, "alice.b+test@x-y_z");
        assert!(errors.is_empty());

        check_username(&mut errors, "bad name");
        assert_eq!(errors.get("username"), Some(&[INVALID_USERNAME.to_string()][..]));
    }

    #[test]
    fn blank_email_is_allowed_but_malformed_is_not() {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "");
        check_email(&mut errors, "a@x.com");
        assert!(errors.is_empty());

        check_email(&mut errors, "not-an-email");
        assert_eq!(errors.get("email"), Some(&[INVALID_EMAIL.to_string()][..]));
    }

    #[test]
    fn text_checks_blank_then_length() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "title", "   ", TITLE_MAX);
        check_text(&mut errors, "name", &"x".repeat(201), PROJECT_NAME_MAX);

        assert_eq!(errors.get("title"), Some(&[BLANK.to_string()][..]));
        assert_eq!(errors.get("name"), Some(&[max_length(200)][..]));
    }

    #[test]
    fn invalid_pk_message() {
        assert_eq!(invalid_pk(42), "Invalid pk \"42\" - object does not exist.");
    }
}
