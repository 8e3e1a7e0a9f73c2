use crate::domain::model::{Address, Gender, User};
use crate::infra::storage::entity::Model as UserRow;

/// Convert a stored row to the domain read model. The password column
/// stays behind.
pub fn to_domain(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        age: row.age,
        gender: row.gender.parse().unwrap_or(Gender::Other),
        address: Address {
            city: row.city,
            state: row.state,
            country: row.country,
        },
        is_admin: row.is_admin,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
