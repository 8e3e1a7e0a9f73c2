//! Field rules for the user record schema.
//!
//! Each field is validated independently and registration collects
//! every failure message instead of stopping at the first one. The
//! same per-field functions back the update path, where only the
//! supplied fields are re-checked.

use std::sync::LazyLock;

use regex::Regex;

use super::model::{Gender, NewUser, UserDraft};

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z]+(?:[ '-][A-Za-z]+)*$").expect("name regex"));

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z]+(?:[ '-][A-Za-z]+)*$").expect("location regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex")
});

/// The only symbols a password may (and must) draw from.
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

const NAME_MIN: usize = 3;
const NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const PASSWORD_MAX: usize = 12;
const MIN_AGE: i64 = 18;

/// Validate a full registration candidate.
///
/// Returns the normalized insert-ready record, or every failure
/// message in schema field order.
pub fn validate_draft(draft: &UserDraft) -> Result<NewUser, Vec<String>> {
    let mut messages = Vec::new();

    let address = draft.address.clone().unwrap_or_default();

    let name = collect(&mut messages, validate_name(draft.name.as_deref()));
    let email = collect(&mut messages, validate_email(draft.email.as_deref()));
    let city = collect(&mut messages, validate_location(address.city.as_deref(), "City"));
    let state = collect(
        &mut messages,
        validate_location(address.state.as_deref(), "State"),
    );
    let country = collect(
        &mut messages,
        validate_location(address.country.as_deref(), "Country"),
    );
    let password = collect(&mut messages, validate_password(draft.password.as_deref()));
    let age = collect(&mut messages, validate_age(draft.age));
    let gender = collect(&mut messages, validate_gender(draft.gender.as_deref()));

    if !messages.is_empty() {
        return Err(messages);
    }

    // All `collect` calls above succeeded, so the options are populated.
    match (name, email, city, state, country, password, age, gender) {
        (
            Some(name),
            Some(email),
            Some(city),
            Some(state),
            Some(country),
            Some(password),
            Some(age),
            Some(gender),
        ) => Ok(NewUser {
            name,
            email,
            password,
            age,
            gender,
            city,
            state,
            country,
            is_admin: draft.is_admin.unwrap_or(false),
        }),
        _ => Err(vec!["User validation failed".to_string()]),
    }
}

fn collect<T>(messages: &mut Vec<String>, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            messages.push(message);
            None
        }
    }
}

pub(crate) fn validate_name(raw: Option<&str>) -> Result<String, String> {
    let name = required(raw).ok_or_else(|| "Name is required".to_string())?;
    let len = name.chars().count();
    if len < NAME_MIN {
        return Err("Name must be at least 3 characters".to_string());
    }
    if len > NAME_MAX {
        return Err("Name must be less than 50 characters".to_string());
    }
    if !NAME_RE.is_match(name) {
        return Err(
            "Name must start with uppercase and contain only alphabets, space, hyphen or apostrophe"
                .to_string(),
        );
    }
    Ok(name.to_string())
}

pub(crate) fn validate_email(raw: Option<&str>) -> Result<String, String> {
    let email = required(raw)
        .ok_or_else(|| "Email is required".to_string())?
        .to_ascii_lowercase();
    if !EMAIL_RE.is_match(&email) {
        return Err("Invalid email format".to_string());
    }
    Ok(email)
}

pub(crate) fn validate_password(raw: Option<&str>) -> Result<String, String> {
    let password = required(raw).ok_or_else(|| "Password is required".to_string())?;
    let len = password.chars().count();
    if len < PASSWORD_MIN {
        return Err("Min length is 8".to_string());
    }
    if len > PASSWORD_MAX {
        return Err("Max length is 12".to_string());
    }
    if !password_charset_ok(password) {
        return Err(
            "Password must contain at least 1 letter, 1 number & 1 special character".to_string(),
        );
    }
    Ok(password.to_string())
}

// At least one letter, one digit and one symbol from the fixed set,
// with no character outside those three classes.
fn password_charset_ok(password: &str) -> bool {
    let mut has_letter = false;
    let mut has_digit = false;
    let mut has_symbol = false;
    for c in password.chars() {
        if c.is_ascii_alphabetic() {
            has_letter = true;
        } else if c.is_ascii_digit() {
            has_digit = true;
        } else if PASSWORD_SYMBOLS.contains(c) {
            has_symbol = true;
        } else {
            return false;
        }
    }
    has_letter && has_digit && has_symbol
}

pub(crate) fn validate_age(raw: Option<i64>) -> Result<i64, String> {
    let age = raw.ok_or_else(|| "Age required".to_string())?;
    if age < MIN_AGE {
        return Err("Minimum age of 18 is required".to_string());
    }
    Ok(age)
}

pub(crate) fn validate_gender(raw: Option<&str>) -> Result<Gender, String> {
    let gender = required(raw).ok_or_else(|| "Gender required".to_string())?;
    gender
        .parse()
        .map_err(|_| "Gender must be either male, female or other".to_string())
}

pub(crate) fn validate_location(raw: Option<&str>, field: &str) -> Result<String, String> {
    let value = required(raw).ok_or_else(|| format!("{field} is required"))?;
    if !LOCATION_RE.is_match(value) {
        return Err(format!(
            "{field} must start with uppercase and contain only alphabet characters"
        ));
    }
    Ok(value.to_string())
}

fn required(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AddressDraft;

    fn valid_draft() -> UserDraft {
        UserDraft {
            name: Some("Asha Rao".to_string()),
            email: Some(" Asha.Rao@Example.COM ".to_string()),
            password: Some("passw0rd!".to_string()),
            age: Some(30),
            gender: Some("Female".to_string()),
            address: Some(AddressDraft {
                city: Some("Pune".to_string()),
                state: Some("Maharashtra".to_string()),
                country: Some("India".to_string()),
            }),
            is_admin: None,
        }
    }

    #[test]
    fn valid_draft_is_normalized() {
        let user = validate_draft(&valid_draft()).expect("draft should validate");
        assert_eq!(user.email, "asha.rao@example.com");
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.city, "Pune");
        assert!(!user.is_admin);
    }

    #[test]
    fn empty_draft_collects_every_required_message() {
        let errs = validate_draft(&UserDraft::default()).unwrap_err();
        assert_eq!(
            errs,
            vec![
                "Name is required",
                "Email is required",
                "City is required",
                "State is required",
                "Country is required",
                "Password is required",
                "Age required",
                "Gender required",
            ]
        );
    }

    #[test]
    fn multiple_field_failures_are_all_reported() {
        let mut draft = valid_draft();
        draft.name = Some("al".to_string());
        draft.age = Some(10);
        let errs = validate_draft(&draft).unwrap_err();
        assert!(errs.contains(&"Name must be at least 3 characters".to_string()));
        assert!(errs.contains(&"Minimum age of 18 is required".to_string()));
        assert_eq!(errs.len(), 2);
    }

    #[test]
    fn name_rules() {
        assert!(validate_name(Some("Asha")).is_ok());
        assert!(validate_name(Some("Mary-Jane O'Neil")).is_ok());
        assert_eq!(
            validate_name(Some("asha")).unwrap_err(),
            "Name must start with uppercase and contain only alphabets, space, hyphen or apostrophe"
        );
        assert_eq!(
            validate_name(Some("A".repeat(51).as_str())).unwrap_err(),
            "Name must be less than 50 characters"
        );
        assert_eq!(validate_name(Some("   ")).unwrap_err(), "Name is required");
    }

    #[test]
    fn email_is_lowercased_before_matching() {
        assert_eq!(
            validate_email(Some("USER@EXAMPLE.COM")).unwrap(),
            "user@example.com"
        );
        assert_eq!(
            validate_email(Some("not-an-email")).unwrap_err(),
            "Invalid email format"
        );
    }

    #[test]
    fn password_rules() {
        assert!(validate_password(Some("abc123!X")).is_ok());
        assert_eq!(validate_password(Some("ab1!")).unwrap_err(), "Min length is 8");
        assert_eq!(
            validate_password(Some("abcdefgh12345")).unwrap_err(),
            "Max length is 12"
        );
        // no digit
        assert_eq!(
            validate_password(Some("abcdefg!")).unwrap_err(),
            "Password must contain at least 1 letter, 1 number & 1 special character"
        );
        // character outside the allowed set
        assert_eq!(
            validate_password(Some("abc123!#")).unwrap_err(),
            "Password must contain at least 1 letter, 1 number & 1 special character"
        );
    }

    #[test]
    fn location_rules() {
        assert!(validate_location(Some("New Delhi"), "City").is_ok());
        assert_eq!(
            validate_location(Some("pune"), "City").unwrap_err(),
            "City must start with uppercase and contain only alphabet characters"
        );
        assert_eq!(
            validate_location(None, "Country").unwrap_err(),
            "Country is required"
        );
    }
}
