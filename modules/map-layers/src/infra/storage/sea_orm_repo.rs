use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use super::entity::{feature, map_layer};
use super::mapper::{apply_feature_patch, apply_layer_patch};
use crate::domain::error::DomainError;
use crate::domain::model::{
    Feature, FeaturePatch, MapLayer, MapLayerPatch, NewFeature, NewMapLayer,
};
use crate::domain::repo::MapLayersRepository;

/// Rows per INSERT; three bind parameters each stays far below the
/// Postgres and SQLite parameter limits.
const IMPORT_CHUNK: usize = 1000;

pub fn db_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::database(e)
}

fn feature_write_err(e: DbErr, name: &str, layer_id: i32) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateFeature {
            name: name.to_owned(),
            layer_id,
        },
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => DomainError::LayerNotFound(layer_id),
        _ => db_err(e),
    }
}

/// `%fragment%` in lower case with LIKE metacharacters escaped by `\`.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// SeaORM implementation of [`MapLayersRepository`].
pub struct SeaOrmMapLayersRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmMapLayersRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MapLayersRepository for SeaOrmMapLayersRepository {
    async fn list_layers(&self) -> Result<Vec<MapLayer>, DomainError> {
        let rows = map_layer::Entity::find()
            .order_by_asc(map_layer::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_layer(&self, id: i32) -> Result<Option<MapLayer>, DomainError> {
        let found = map_layer::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn insert_layer(&self, new: NewMapLayer) -> Result<MapLayer, DomainError> {
        let created = map_layer::ActiveModel {
            id: NotSet,
            url: Set(new.url),
            name: Set(new.name),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(db_err)?;
        Ok(created.into())
    }

    async fn update_layer(
        &self,
        id: i32,
        patch: MapLayerPatch,
    ) -> Result<Option<MapLayer>, DomainError> {
        let Some(found) = map_layer::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut am = found.clone().into_active_model();
        apply_layer_patch(&mut am, patch);
        if !am.is_changed() {
            return Ok(Some(found.into()));
        }
        let updated = am.update(self.db.as_ref()).await.map_err(db_err)?;
        Ok(Some(updated.into()))
    }

    async fn delete_layer(&self, id: i32) -> Result<Option<MapLayer>, DomainError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let Some(found) = map_layer::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        feature::Entity::delete_many()
            .filter(feature::Column::LayerId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        map_layer::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        Ok(Some(found.into()))
    }

    async fn layer_features(&self, layer_id: i32) -> Result<Vec<Feature>, DomainError> {
        let rows = feature::Entity::find()
            .filter(feature::Column::LayerId.eq(layer_id))
            .order_by_asc(feature::Column::Name)
            .order_by_asc(feature::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn search_features(&self, fragment: &str) -> Result<Vec<Feature>, DomainError> {
        let name_lower = Func::lower(Expr::col((feature::Entity, feature::Column::Name)));
        let pattern = LikeExpr::new(like_pattern(fragment)).escape('\\');
        let rows = feature::Entity::find()
            .filter(Expr::expr(name_lower).like(pattern))
            .order_by_asc(feature::Column::Name)
            .order_by_asc(feature::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_feature(&self, new: NewFeature) -> Result<Feature, DomainError> {
        let (name, layer_id) = (new.name.clone(), new.layer_id);
        let created = feature::ActiveModel::from(new)
            .insert(self.db.as_ref())
            .await
            .map_err(|e| feature_write_err(e, &name, layer_id))?;
        Ok(created.into())
    }

    async fn update_feature(
        &self,
        id: i32,
        patch: FeaturePatch,
    ) -> Result<Option<Feature>, DomainError> {
        let Some(found) = feature::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let name = patch.name.clone().unwrap_or_else(|| found.name.clone());
        let layer_id = found.layer_id;
        let mut am = found.clone().into_active_model();
        apply_feature_patch(&mut am, patch);
        if !am.is_changed() {
            return Ok(Some(found.into()));
        }
        let updated = am
            .update(self.db.as_ref())
            .await
            .map_err(|e| feature_write_err(e, &name, layer_id))?;
        Ok(Some(updated.into()))
    }

    async fn delete_feature(&self, id: i32) -> Result<Option<Feature>, DomainError> {
        let Some(found) = feature::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };
        let res = feature::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;
        Ok((res.rows_affected > 0).then(|| found.into()))
    }

    async fn insert_features_skip_duplicates(
        &self,
        rows: Vec<NewFeature>,
    ) -> Result<u64, DomainError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await.map_err(db_err)?;
        let mut inserted = 0;
        for chunk in rows.chunks(IMPORT_CHUNK) {
            let models = chunk.iter().cloned().map(feature::ActiveModel::from);
            inserted += feature::Entity::insert_many(models)
                .on_conflict(
                    OnConflict::columns([feature::Column::Name, feature::Column::LayerId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(db_err)?;
        }
        txn.commit().await.map_err(db_err)?;
        Ok(inserted)
    }
}
