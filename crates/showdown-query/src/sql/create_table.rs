use sea_query::{Alias, ForeignKey, Index, Table, TableCreateStatement};

use showdown_core::{ColumnDef, TableConstraint};

use super::helpers::{build_sea_column_def, to_sea_fk_action};
use super::types::{BuiltQuery, DatabaseBackend};

fn build_create_table_for_backend(
    _backend: &DatabaseBackend,
    table: &str,
    columns: &[ColumnDef],
    constraints: &[TableConstraint],
) -> TableCreateStatement {
    let mut stmt = Table::create().table(Alias::new(table)).to_owned();

    for column in columns {
        stmt.col(build_sea_column_def(column));
    }

    for constraint in constraints {
        let name = constraint.resolved_name(table);
        match constraint {
            TableConstraint::PrimaryKey { columns: pk_cols, .. } => {
                let mut pk_idx = Index::create();
                pk_idx.name(name);
                for c in pk_cols {
                    pk_idx.col(Alias::new(c));
                }
                stmt.primary_key(&mut pk_idx);
            }
            TableConstraint::ForeignKey {
                columns: fk_cols,
                ref_table,
                ref_columns,
                on_delete,
                on_update,
                ..
            } => {
                let mut fk = ForeignKey::create();
                fk.name(name).from_tbl(Alias::new(table)).to_tbl(Alias::new(ref_table));
                for col in fk_cols {
                    fk.from_col(Alias::new(col));
                }
                for col in ref_columns {
                    fk.to_col(Alias::new(col));
                }
                if let Some(action) = on_delete {
                    fk.on_delete(to_sea_fk_action(action));
                }
                if let Some(action) = on_update {
                    fk.on_update(to_sea_fk_action(action));
                }
                stmt.foreign_key(&mut fk);
            }
        }
    }

    stmt
}

pub fn build_create_table(
    backend: &DatabaseBackend,
    table: &str,
    columns: &[ColumnDef],
    constraints: &[TableConstraint],
) -> BuiltQuery {
    BuiltQuery::CreateTable(Box::new(build_create_table_for_backend(
        backend,
        table,
        columns,
        constraints,
    )))
}
