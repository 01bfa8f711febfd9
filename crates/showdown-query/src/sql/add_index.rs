use sea_query::{Alias, Index};

use showdown_core::IndexDef;

use super::types::BuiltQuery;

pub fn build_add_index(table: &str, index: &IndexDef) -> BuiltQuery {
    let mut stmt = Index::create()
        .name(index.resolved_name(table))
        .table(Alias::new(table))
        .to_owned();

    for col in &index.columns {
        stmt.col(Alias::new(col));
    }

    if index.unique {
        stmt.unique();
    }

    BuiltQuery::CreateIndex(Box::new(stmt))
}
