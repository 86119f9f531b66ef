use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "features")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub properties: Option<String>,
    pub layer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::map_layer::Entity",
        from = "Column::LayerId",
        to = "super::map_layer::Column::Id",
        on_delete = "Cascade"
    )]
    MapLayer,
}

impl Related<super::map_layer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MapLayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
