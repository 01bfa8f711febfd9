use sea_query::{Alias, Query};

use showdown_core::SeedValue;

use super::helpers::to_sea_value;
use super::types::BuiltQuery;
use crate::error::QueryError;

pub fn build_insert_data(
    table: &str,
    columns: &[String],
    rows: &[Vec<SeedValue>],
) -> Result<BuiltQuery, QueryError> {
    let mut stmt = Query::insert();
    stmt.into_table(Alias::new(table))
        .columns(columns.iter().map(Alias::new));

    for row in rows {
        stmt.values(row.iter().map(to_sea_value))
            .map_err(|e| QueryError::InvalidRow {
                table: table.to_string(),
                reason: e.to_string(),
            })?;
    }

    Ok(BuiltQuery::Insert(Box::new(stmt)))
}
