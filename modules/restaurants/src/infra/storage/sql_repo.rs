//! PostGIS-backed repository using fully parametrized statements.

use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement, Value};

use super::mapper::RestaurantRow;
use crate::domain::model::{NewRestaurant, PageRequest, Restaurant, RestaurantPatch};
use crate::domain::repo::RestaurantRepository;

macro_rules! restaurant_columns {
    () => {
        r#"id, name, ST_AsGeoJSON(geom) AS geometry, cuisine, "addr:street" AS addr_street, "addr:housenumber" AS addr_housenumber"#
    };
}

pub(crate) const LIST_SQL: &str = concat!(
    "SELECT ",
    restaurant_columns!(),
    " FROM restaurants ORDER BY name ASC, id ASC"
);

pub(crate) const LIST_PAGE_SQL: &str = concat!(
    "SELECT ",
    restaurant_columns!(),
    " FROM restaurants ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2"
);

pub(crate) const SEARCH_SQL: &str = concat!(
    "SELECT ",
    restaurant_columns!(),
    r" FROM restaurants WHERE name ILIKE $1 ESCAPE '\' ORDER BY name ASC, id ASC"
);

pub(crate) const INSERT_SQL: &str = concat!(
    r#"INSERT INTO restaurants (name, geom, cuisine, "addr:street", "addr:housenumber") "#,
    "VALUES ($1, ST_SetSRID(ST_MakePoint($2::float8, $3::float8), 4326), $4, $5, $6) RETURNING ",
    restaurant_columns!()
);

pub(crate) const UPDATE_SQL: &str = concat!(
    "UPDATE restaurants SET name = COALESCE($1, name), ",
    "geom = COALESCE(ST_SetSRID(ST_MakePoint($2::float8, $3::float8), 4326), geom), ",
    "cuisine = COALESCE($4, cuisine), ",
    r#""addr:street" = COALESCE($5, "addr:street"), "#,
    r#""addr:housenumber" = COALESCE($6, "addr:housenumber") "#,
    "WHERE id = $7 RETURNING ",
    restaurant_columns!()
);

pub(crate) const DELETE_SQL: &str = concat!(
    "DELETE FROM restaurants WHERE id = $1 RETURNING ",
    restaurant_columns!()
);

pub struct SqlRestaurantRepository {
    db: Arc<DatabaseConnection>,
}

impl SqlRestaurantRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn fetch_all(&self, stmt: Statement) -> anyhow::Result<Vec<Restaurant>> {
        RestaurantRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn fetch_one(&self, stmt: Statement) -> anyhow::Result<Option<Restaurant>> {
        RestaurantRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await?
            .map(decode)
            .transpose()
    }
}

fn statement<I>(sql: &str, values: I) -> Statement
where
    I: IntoIterator<Item = Value>,
{
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

fn decode(row: RestaurantRow) -> anyhow::Result<Restaurant> {
    let id = row.id;
    Restaurant::try_from(row).with_context(|| format!("malformed geometry for restaurant {id}"))
}

/// Escapes LIKE metacharacters so the fragment matches literally.
pub(crate) fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl RestaurantRepository for SqlRestaurantRepository {
    async fn list(&self, page: Option<PageRequest>) -> anyhow::Result<Vec<Restaurant>> {
        let stmt = match page {
            None => statement(LIST_SQL, []),
            Some(page) => statement(
                LIST_PAGE_SQL,
                [
                    i64::try_from(page.limit)?.into(),
                    i64::try_from(page.offset)?.into(),
                ],
            ),
        };
        self.fetch_all(stmt).await
    }

    async fn search_by_name(&self, fragment: &str) -> anyhow::Result<Vec<Restaurant>> {
        self.fetch_all(statement(SEARCH_SQL, [like_pattern(fragment).into()]))
            .await
    }

    async fn insert(&self, new: NewRestaurant) -> anyhow::Result<Restaurant> {
        let stmt = statement(
            INSERT_SQL,
            [
                new.name.into(),
                new.location.longitude().into(),
                new.location.latitude().into(),
                new.cuisine.into(),
                new.addr_street.into(),
                new.addr_housenumber.into(),
            ],
        );
        self.fetch_one(stmt)
            .await?
            .context("INSERT ... RETURNING produced no row")
    }

    async fn update(&self, id: i32, patch: RestaurantPatch) -> anyhow::Result<Option<Restaurant>> {
        let longitude = patch.location.map(|p| p.longitude());
        let latitude = patch.location.map(|p| p.latitude());
        let stmt = statement(
            UPDATE_SQL,
            [
                patch.name.into(),
                longitude.into(),
                latitude.into(),
                patch.cuisine.into(),
                patch.addr_street.into(),
                patch.addr_housenumber.into(),
                id.into(),
            ],
        );
        self.fetch_one(stmt).await
    }

    async fn delete(&self, id: i32) -> anyhow::Result<Option<Restaurant>> {
        self.fetch_one(statement(DELETE_SQL, [id.into()])).await
    }
}
