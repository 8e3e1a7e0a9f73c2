use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::model::{AddressDraft, User, UserDraft};

/// Registration payload. Fields are optional so schema validation can
/// report every missing field instead of failing at parse time;
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub address: Option<AddressReq>,
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressReq {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Normalized public user shape.
///
/// Every field is always serialized; values a record does not carry
/// come out as `null`, never omitted. The address is always an object,
/// even when all three sub-fields are null. The password never appears.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub is_admin: bool,
    pub address: AddressDto,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDto {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id.to_string()),
            name: Some(user.name),
            email: Some(user.email),
            age: Some(user.age),
            gender: Some(user.gender.to_string()),
            is_admin: user.is_admin,
            address: AddressDto {
                city: user.address.city,
                state: user.address.state,
                country: user.address.country,
            },
            created_at: Some(user.created_at),
            updated_at: Some(user.updated_at),
        }
    }
}

impl From<RegisterUserReq> for UserDraft {
    fn from(req: RegisterUserReq) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            age: req.age,
            gender: req.gender,
            address: req.address.map(Into::into),
            is_admin: req.is_admin,
        }
    }
}

impl From<AddressReq> for AddressDraft {
    fn from(req: AddressReq) -> Self {
        Self {
            city: req.city,
            state: req.state,
            country: req.country,
        }
    }
}

/// Success envelope carrying data.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Envelope carrying only a message; used for both successes and
/// failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Address, Gender};
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    fn sample_user() -> User {
        User {
            id: Uuid::nil(),
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            age: 30,
            gender: Gender::Female,
            address: Address {
                city: Some("Pune".to_string()),
                state: None,
                country: Some("India".to_string()),
            },
            is_admin: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn absent_values_serialize_as_null_not_omitted() {
        let value = serde_json::to_value(UserDto::from(sample_user())).unwrap();
        assert_eq!(value["address"]["state"], json!(null));
        assert_eq!(value["address"]["city"], json!("Pune"));
        assert_eq!(value["gender"], json!("female"));
        assert_eq!(value["id"], json!(Uuid::nil().to_string()));
        assert!(value.get("password").is_none());
    }

    #[test]
    fn normalization_is_idempotent() {
        let dto = UserDto::from(sample_user());
        let once = serde_json::to_value(&dto).unwrap();
        let again: UserDto = serde_json::from_value(once.clone()).unwrap();
        assert_eq!(again, dto);
        assert_eq!(serde_json::to_value(&again).unwrap(), once);
    }
}
