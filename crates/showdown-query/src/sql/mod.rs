pub mod add_index;
pub mod create_table;
pub mod drop_table;
pub mod helpers;
pub mod insert_data;
pub mod types;

pub use helpers::*;
pub use types::{BuiltQuery, DatabaseBackend};

use crate::error::QueryError;
use showdown_core::MigrationAction;

use self::{
    add_index::build_add_index, create_table::build_create_table, drop_table::build_drop_table,
    insert_data::build_insert_data,
};

pub fn build_action_queries(
    backend: &DatabaseBackend,
    action: &MigrationAction,
) -> Result<Vec<BuiltQuery>, QueryError> {
    match action {
        MigrationAction::CreateTable {
            table,
            columns,
            constraints,
        } => Ok(vec![build_create_table(backend, table, columns, constraints)]),

        MigrationAction::AddIndex { table, index } => Ok(vec![build_add_index(table, index)]),

        MigrationAction::InsertData {
            table,
            columns,
            rows,
        } => {
            // Nothing to insert is not an error, but an empty VALUES list is.
            if rows.is_empty() {
                return Ok(vec![]);
            }
            Ok(vec![build_insert_data(table, columns, rows)?])
        }

        MigrationAction::DropTable { table } => Ok(vec![build_drop_table(table)]),
    }
}
