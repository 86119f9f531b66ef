use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::entity::{profile, user};
use super::mapper::{apply_profile_patch, user_from_models};
use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, Profile, ProfileFields, User, UserChanges};
use crate::domain::repo::UsersRepository;

pub fn db_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::database(e)
}

fn insert_err(e: DbErr, email: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::EmailTaken(email.to_owned()),
        _ => db_err(e),
    }
}

/// SeaORM implementation of [`UsersRepository`].
pub struct SeaOrmUsersRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmUsersRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        user::Entity::find_by_id(id)
            .find_also_related(profile::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
            .map(|(u, p)| user_from_models(u, p))
            .transpose()
    }
}

fn new_profile(user_id: Uuid, fields: ProfileFields) -> profile::ActiveModel {
    let mut am = profile::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id),
        ..Default::default()
    };
    apply_profile_patch(&mut am, fields);
    am
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        user::Entity::find()
            .find_also_related(profile::Entity)
            .order_by_asc(user::Column::Email)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|(u, p)| user_from_models(u, p))
            .collect()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.load(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(profile::Entity)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
            .map(|(u, p)| user_from_models(u, p))
            .transpose()
    }

    async fn insert(&self, new: NewUser) -> Result<User, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let user_id = Uuid::now_v7();

        let created = user::ActiveModel {
            id: Set(user_id),
            email: Set(new.email.clone()),
            password: Set(new.password_hash),
            role: Set(new.role.as_str().to_owned()),
            activate: Set(true),
        }
        .insert(&txn)
        .await
        .map_err(|e| insert_err(e, &new.email))?;

        let profile = new_profile(user_id, new.profile)
            .insert(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        user_from_models(created, Some(profile))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<User>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let Some(found) = user::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut am = found.into_active_model();
        if let Some(hash) = changes.password_hash {
            am.password = Set(hash);
        }
        if let Some(role) = changes.role {
            am.role = Set(role.as_str().to_owned());
        }
        if let Some(activate) = changes.activate {
            am.activate = Set(activate);
        }
        if am.is_changed() {
            am.update(&txn).await.map_err(db_err)?;
        }

        let existing = profile::Entity::find()
            .filter(profile::Column::UserId.eq(id))
            .one(&txn)
            .await
            .map_err(db_err)?;
        match existing {
            Some(model) => {
                let mut am = model.into_active_model();
                apply_profile_patch(&mut am, changes.profile);
                if am.is_changed() {
                    am.update(&txn).await.map_err(db_err)?;
                }
            }
            None => {
                new_profile(id, changes.profile)
                    .insert(&txn)
                    .await
                    .map_err(db_err)?;
            }
        }

        txn.commit().await.map_err(db_err)?;
        self.load(id).await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let Some(existing) = self.load(id).await? else {
            return Ok(None);
        };

        let txn = self.db.begin().await.map_err(db_err)?;
        profile::Entity::delete_many()
            .filter(profile::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        let res = user::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok((res.rows_affected > 0).then_some(existing))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let rows = profile::Entity::find()
            .order_by_asc(profile::Column::Email)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_profile(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let found = profile::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfileFields,
    ) -> Result<Option<Profile>, DomainError> {
        let Some(found) = profile::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut am = found.clone().into_active_model();
        apply_profile_patch(&mut am, patch);
        if !am.is_changed() {
            return Ok(Some(found.into()));
        }
        let updated = am.update(self.db.as_ref()).await.map_err(db_err)?;
        Ok(Some(updated.into()))
    }
}
