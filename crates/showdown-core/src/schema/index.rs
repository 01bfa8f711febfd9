use serde::{Deserialize, Serialize};

use crate::schema::names::{ColumnName, IndexName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDef {
    /// Explicit index name. When absent the `IX_{table}_{columns}` name is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<IndexName>,
    pub columns: Vec<ColumnName>,
    #[serde(default)]
    pub unique: bool,
}

impl IndexDef {
    /// Name of the index as created in the database.
    pub fn resolved_name(&self, table: &str) -> IndexName {
        match &self.name {
            Some(name) => name.clone(),
            None => showdown_naming::build_index_name(table, &self.columns),
        }
    }
}
