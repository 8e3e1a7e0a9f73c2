use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier scheme for users. Route parameters must parse as a UUID
/// before any persistence call is made.
pub type UserId = Uuid;

/// Gender as stored: always lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = ();

    /// Case-insensitive: `"MALE"` and `"male"` are the same gender.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read model for a stored user. The password column never leaves the
/// storage layer, so it has no field here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: Gender,
    pub address: Address,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address sub-record. Sub-fields are individually updatable, so a row
/// may hold any subset of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Registration candidate before schema validation. Every field is
/// optional so a missing field surfaces as a validation message rather
/// than a deserialization failure.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub address: Option<AddressDraft>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct AddressDraft {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Insert-ready record produced by schema validation: strings trimmed,
/// email lowercased, gender parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: i64,
    pub gender: Gender,
    pub city: String,
    pub state: String,
    pub country: String,
    pub is_admin: bool,
}
