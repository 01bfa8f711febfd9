use sea_query::{IndexCreateStatement, InsertStatement, TableCreateStatement, TableDropStatement};

use super::helpers::{build_query_statement, build_schema_statement};

/// Database backend for SQL generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    Postgres,
    MySql,
    Sqlite,
}

/// Represents a built query that can be converted to SQL for any database backend
#[derive(Debug, Clone)]
pub enum BuiltQuery {
    CreateTable(Box<TableCreateStatement>),
    CreateIndex(Box<IndexCreateStatement>),
    Insert(Box<InsertStatement>),
    DropTable(Box<TableDropStatement>),
}

impl BuiltQuery {
    /// Build SQL string for the specified database backend.
    /// Insert values are inlined; execution should bind them instead.
    pub fn build(&self, backend: DatabaseBackend) -> String {
        match self {
            BuiltQuery::CreateTable(stmt) => build_schema_statement(stmt.as_ref(), backend),
            BuiltQuery::CreateIndex(stmt) => build_schema_statement(stmt.as_ref(), backend),
            BuiltQuery::Insert(stmt) => build_query_statement(stmt.as_ref(), backend),
            BuiltQuery::DropTable(stmt) => build_schema_statement(stmt.as_ref(), backend),
        }
    }
}
