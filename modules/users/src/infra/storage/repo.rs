//! SeaORM-backed implementation of the domain repository port.

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::model::{NewUser, User, UserId};
use crate::domain::repo::{RepoError, UsersRepository};
use crate::domain::update::SetField;
use crate::infra::storage::entity::{ActiveModel, Column, Entity};
use crate::infra::storage::mapper;

/// Holds the process-wide connection handle created at startup.
pub struct SeaOrmUsersRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let now = Utc::now();
        let row = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name),
            email: Set(user.email),
            password: Set(user.password),
            age: Set(user.age),
            gender: Set(user.gender.to_string()),
            city: Set(Some(user.city)),
            state: Set(Some(user.state)),
            country: Set(Some(user.country)),
            is_admin: Set(user.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = row.insert(&self.db).await.map_err(classify_insert_err)?;
        Ok(mapper::to_domain(inserted))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let rows = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .context("find_all failed")?;
        Ok(rows.into_iter().map(mapper::to_domain).collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        let found = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(mapper::to_domain))
    }

    async fn apply_fields(
        &self,
        id: UserId,
        fields: &[SetField],
    ) -> Result<Option<User>, RepoError> {
        let Some(existing) = Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("load user for update failed")?
        else {
            return Ok(None);
        };

        let mut row: ActiveModel = existing.into();
        for field in fields {
            match field {
                SetField::Name(v) => row.name = Set(v.clone()),
                SetField::Password(v) => row.password = Set(v.clone()),
                SetField::Age(v) => row.age = Set(*v),
                SetField::Gender(v) => row.gender = Set(v.to_string()),
                SetField::IsAdmin(v) => row.is_admin = Set(*v),
                SetField::City(v) => row.city = Set(Some(v.clone())),
                SetField::State(v) => row.state = Set(Some(v.clone())),
                SetField::Country(v) => row.country = Set(Some(v.clone())),
            }
        }
        row.updated_at = Set(Utc::now());

        let updated = row.update(&self.db).await.context("apply_fields failed")?;
        Ok(Some(mapper::to_domain(updated)))
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, RepoError> {
        let res = Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete_by_id failed")?;
        Ok(res.rows_affected > 0)
    }
}

fn classify_insert_err(err: sea_orm::DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepoError::UniqueViolation { field: "email" },
        _ => RepoError::Storage(anyhow::Error::new(err).context("insert failed")),
    }
}
