use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "abbreviations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub abbreviation: String,
    #[sea_orm(column_type = "Text")]
    pub full_name: String,
    /// lowercase copies maintained on write
    #[sea_orm(column_type = "Text")]
    pub abbreviation_search: String,
    #[sea_orm(column_type = "Text")]
    pub full_name_search: String,
    pub copy_count: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
