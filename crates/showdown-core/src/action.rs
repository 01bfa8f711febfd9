use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDef, ColumnName, IndexDef, SeedValue, TableConstraint, TableName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub actions: Vec<MigrationAction>,
    /// Actions that undo `actions`, run in order on revert.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub down: Vec<MigrationAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MigrationAction {
    #[serde(rename_all = "camelCase")]
    CreateTable {
        table: TableName,
        columns: Vec<ColumnDef>,
        #[serde(default)]
        constraints: Vec<TableConstraint>,
    },
    #[serde(rename_all = "camelCase")]
    AddIndex { table: TableName, index: IndexDef },
    /// Seed rows. Every row lists its values in the order of `columns`.
    #[serde(rename_all = "camelCase")]
    InsertData {
        table: TableName,
        columns: Vec<ColumnName>,
        rows: Vec<Vec<SeedValue>>,
    },
    #[serde(rename_all = "camelCase")]
    DropTable { table: TableName },
}

impl MigrationAction {
    pub fn table(&self) -> &str {
        match self {
            MigrationAction::CreateTable { table, .. }
            | MigrationAction::AddIndex { table, .. }
            | MigrationAction::InsertData { table, .. }
            | MigrationAction::DropTable { table } => table,
        }
    }
}
