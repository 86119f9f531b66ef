use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MapLayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MapLayers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MapLayers::Url).text().not_null())
                    .col(ColumnDef::new(MapLayers::Name).text())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Features::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Features::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Features::Name).text().not_null())
                    .col(ColumnDef::new(Features::Properties).text())
                    .col(ColumnDef::new(Features::LayerId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_features_layer_id")
                            .from(Features::Table, Features::LayerId)
                            .to(MapLayers::Table, MapLayers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Target of the import's ON CONFLICT clause.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_features_name_layer_id")
                    .table(Features::Table)
                    .col(Features::Name)
                    .col(Features::LayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_features_layer_id")
                    .table(Features::Table)
                    .col(Features::LayerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Features::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MapLayers::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MapLayers {
    Table,
    Id,
    Url,
    Name,
}

#[derive(DeriveIden)]
enum Features {
    Table,
    Id,
    Name,
    Properties,
    LayerId,
}
