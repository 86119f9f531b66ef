use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

const UP_SQL: &[&str] = &[
    "CREATE EXTENSION IF NOT EXISTS postgis",
    r#"CREATE TABLE IF NOT EXISTS restaurants (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        geom geometry(Point, 4326),
        cuisine TEXT,
        "addr:street" TEXT,
        "addr:housenumber" TEXT
    )"#,
    "CREATE INDEX IF NOT EXISTS restaurants_geom_idx ON restaurants USING GIST (geom)",
    "CREATE INDEX IF NOT EXISTS restaurants_name_idx ON restaurants (name)",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        if backend != DatabaseBackend::Postgres {
            return Err(DbErr::Migration(format!(
                "restaurants need PostgreSQL with PostGIS, got {backend:?}"
            )));
        }
        let conn = manager.get_connection();
        for sql in UP_SQL {
            conn.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS restaurants")
            .await?;
        Ok(())
    }
}
