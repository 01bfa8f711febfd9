use sea_orm::entity::prelude::*;

use crate::filter::UserFilter;

/// Names with more characters than this count as long.
pub const LONG_NAME_THRESHOLD: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "Id")]
    pub id: Uuid,
    #[sea_orm(column_name = "Name")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// In-memory check only. Filtering the table on it requires loading every
    /// row; use [`has_long_name`] in queries.
    pub fn has_long_name(&self) -> bool {
        self.name.chars().count() > LONG_NAME_THRESHOLD
    }
}

/// Long-name filter expressed as a tree the query layer can lower to SQL.
pub fn has_long_name() -> UserFilter {
    UserFilter::NameLongerThan(LONG_NAME_THRESHOLD)
}

/// The same check wrapped around [`Model::has_long_name`]. Opaque to SQL.
pub fn has_long_name_computed() -> UserFilter {
    UserFilter::computed("has_long_name", |user, _| user.has_long_name())
}
