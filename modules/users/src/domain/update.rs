//! Allow-listed partial updates.
//!
//! A PATCH payload goes through two stages: `flatten_payload` expands a
//! nested `address` object into dotted paths and rejects anything
//! outside the allow-list, then `to_commands` turns the surviving
//! `(path, value)` pairs into typed `SetField` commands, re-running the
//! per-field validators. The storage layer only ever sees the typed
//! command list.

use serde_json::{Map, Value};

use super::error::DomainError;
use super::model::Gender;
use super::validation;

/// Top-level fields a PATCH may touch.
pub const UPDATABLE_FIELDS: [&str; 6] = ["name", "password", "age", "gender", "address", "isAdmin"];

/// Address sub-fields a PATCH may touch; anything else under `address`
/// is silently dropped.
pub const ADDRESS_FIELDS: [&str; 3] = ["city", "state", "country"];

/// One validated "set this field" command.
#[derive(Debug, Clone, PartialEq)]
pub enum SetField {
    Name(String),
    Password(String),
    Age(i64),
    Gender(Gender),
    IsAdmin(bool),
    City(String),
    State(String),
    Country(String),
}

impl SetField {
    /// Dotted wire path the command originated from.
    pub fn path(&self) -> &'static str {
        match self {
            SetField::Name(_) => "name",
            SetField::Password(_) => "password",
            SetField::Age(_) => "age",
            SetField::Gender(_) => "gender",
            SetField::IsAdmin(_) => "isAdmin",
            SetField::City(_) => "address.city",
            SetField::State(_) => "address.state",
            SetField::Country(_) => "address.country",
        }
    }
}

/// Expand a PATCH payload into flat `(path, value)` pairs.
///
/// An `address` key holding a non-array object becomes one pair per
/// allow-listed sub-field present; every other key carries through
/// unmodified. Rejects an empty payload, and rejects the whole request
/// when any resulting path is outside the allow-list, naming every
/// offender.
pub fn flatten_payload(payload: &Map<String, Value>) -> Result<Vec<(String, Value)>, DomainError> {
    if payload.is_empty() {
        return Err(DomainError::EmptyUpdate);
    }

    let mut flat = Vec::new();
    for (key, value) in payload {
        if key == "address" {
            if let Value::Object(sub) = value {
                for (sub_key, sub_value) in sub {
                    if ADDRESS_FIELDS.contains(&sub_key.as_str()) {
                        flat.push((format!("address.{sub_key}"), sub_value.clone()));
                    }
                }
                continue;
            }
        }
        flat.push((key.clone(), value.clone()));
    }

    let disallowed: Vec<String> = flat
        .iter()
        .map(|(path, _)| path)
        .filter(|path| {
            !UPDATABLE_FIELDS.contains(&path.as_str()) && !path.starts_with("address.")
        })
        .cloned()
        .collect();
    if !disallowed.is_empty() {
        return Err(DomainError::DisallowedFields { fields: disallowed });
    }

    Ok(flat)
}

/// Convert flat pairs into typed commands, collecting every field
/// validation failure.
pub fn to_commands(pairs: Vec<(String, Value)>) -> Result<Vec<SetField>, DomainError> {
    let mut commands = Vec::new();
    let mut messages = Vec::new();
    for (path, value) in &pairs {
        match parse_command(path, value) {
            Ok(command) => commands.push(command),
            Err(message) => messages.push(message),
        }
    }
    if !messages.is_empty() {
        return Err(DomainError::validation(messages));
    }
    Ok(commands)
}

fn parse_command(path: &str, value: &Value) -> Result<SetField, String> {
    match path {
        "name" => validation::validate_name(opt_str(value, "Name")?).map(SetField::Name),
        "password" => {
            validation::validate_password(opt_str(value, "Password")?).map(SetField::Password)
        }
        "age" => validation::validate_age(opt_int(value)?).map(SetField::Age),
        "gender" => validation::validate_gender(opt_str(value, "Gender")?).map(SetField::Gender),
        "isAdmin" => value
            .as_bool()
            .ok_or_else(|| "isAdmin must be a boolean".to_string())
            .map(SetField::IsAdmin),
        // an `address` that was not an object never got expanded
        "address" => Err("Address must be an object".to_string()),
        "address.city" => {
            validation::validate_location(opt_str(value, "City")?, "City").map(SetField::City)
        }
        "address.state" => {
            validation::validate_location(opt_str(value, "State")?, "State").map(SetField::State)
        }
        "address.country" => validation::validate_location(opt_str(value, "Country")?, "Country")
            .map(SetField::Country),
        other => Err(format!("{other} is not an updatable field")),
    }
}

// JSON null is treated as an absent value so the field validator can
// report its own "required" message.
fn opt_str<'v>(value: &'v Value, field: &str) -> Result<Option<&'v str>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(format!("{field} must be a string")),
    }
}

fn opt_int(value: &Value) -> Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        _ => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| "Age must be an integer".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().expect("object payload").clone()
    }

    #[test]
    fn address_object_expands_to_dotted_paths() {
        let flat = flatten_payload(&payload(json!({
            "address": {"city": "Pune", "zip": "411001"},
            "age": 30
        })))
        .expect("payload should pass the filter");
        assert_eq!(
            flat,
            vec![
                ("address.city".to_string(), json!("Pune")),
                ("age".to_string(), json!(30)),
            ]
        );
    }

    #[test]
    fn disallowed_top_level_field_rejects_whole_request() {
        let err = flatten_payload(&payload(json!({
            "email": "new@example.com",
            "name": "Asha"
        })))
        .unwrap_err();
        match err {
            DomainError::DisallowedFields { fields } => {
                assert_eq!(fields, vec!["email".to_string()]);
            }
            other => panic!("expected DisallowedFields, got {other:?}"),
        }
    }

    #[test]
    fn empty_payload_is_rejected_before_filtering() {
        let err = flatten_payload(&Map::new()).unwrap_err();
        assert!(matches!(err, DomainError::EmptyUpdate));
    }

    #[test]
    fn address_with_only_unknown_sub_fields_filters_to_nothing() {
        let flat = flatten_payload(&payload(json!({"address": {"zip": "411001"}}))).unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn non_object_address_fails_field_validation() {
        let flat = flatten_payload(&payload(json!({"address": "Pune"}))).unwrap();
        let err = to_commands(flat).unwrap_err();
        match err {
            DomainError::Validation { messages } => {
                assert_eq!(messages, vec!["Address must be an object".to_string()]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn commands_carry_typed_validated_values() {
        let flat = flatten_payload(&payload(json!({
            "age": 31,
            "gender": "FEMALE",
            "address": {"city": "Mumbai"}
        })))
        .unwrap();
        let commands = to_commands(flat).unwrap();
        // serde_json orders object keys, so `address` expands first
        assert_eq!(
            commands,
            vec![
                SetField::City("Mumbai".to_string()),
                SetField::Age(31),
                SetField::Gender(Gender::Female),
            ]
        );
    }

    #[test]
    fn command_paths_round_trip() {
        assert_eq!(SetField::City("Pune".to_string()).path(), "address.city");
        assert_eq!(SetField::IsAdmin(true).path(), "isAdmin");
    }

    #[test]
    fn field_rules_apply_on_update_too() {
        let flat = flatten_payload(&payload(json!({"age": 10, "name": "al"}))).unwrap();
        let err = to_commands(flat).unwrap_err();
        match err {
            DomainError::Validation { messages } => {
                assert!(messages.contains(&"Minimum age of 18 is required".to_string()));
                assert!(messages.contains(&"Name must be at least 3 characters".to_string()));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn null_value_reports_required_message() {
        let flat = flatten_payload(&payload(json!({"name": null}))).unwrap();
        let err = to_commands(flat).unwrap_err();
        match err {
            DomainError::Validation { messages } => {
                assert_eq!(messages, vec!["Name is required".to_string()]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
