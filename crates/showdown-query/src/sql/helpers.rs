use sea_query::{
    Alias, ColumnDef as SeaColumnDef, ForeignKeyAction, Keyword, MysqlQueryBuilder,
    PostgresQueryBuilder, QueryStatementWriter, SchemaStatementBuilder, SimpleExpr,
    SqliteQueryBuilder,
};

use showdown_core::{ColumnDef, ColumnType, ReferenceAction, SeedValue};

use super::types::DatabaseBackend;

/// Helper function to convert a schema statement to SQL for a specific backend
pub fn build_schema_statement<T: SchemaStatementBuilder>(
    stmt: &T,
    backend: DatabaseBackend,
) -> String {
    match backend {
        DatabaseBackend::Postgres => SchemaStatementBuilder::to_string(stmt, PostgresQueryBuilder),
        DatabaseBackend::MySql => SchemaStatementBuilder::to_string(stmt, MysqlQueryBuilder),
        DatabaseBackend::Sqlite => SchemaStatementBuilder::to_string(stmt, SqliteQueryBuilder),
    }
}

/// Helper function to convert a query statement (INSERT, SELECT, etc.) to SQL for a specific backend
pub fn build_query_statement<T: QueryStatementWriter>(
    stmt: &T,
    backend: DatabaseBackend,
) -> String {
    match backend {
        DatabaseBackend::Postgres => QueryStatementWriter::to_string(stmt, PostgresQueryBuilder),
        DatabaseBackend::MySql => QueryStatementWriter::to_string(stmt, MysqlQueryBuilder),
        DatabaseBackend::Sqlite => QueryStatementWriter::to_string(stmt, SqliteQueryBuilder),
    }
}

/// Apply showdown ColumnType to sea_query ColumnDef
pub fn apply_column_type(col: &mut SeaColumnDef, ty: ColumnType) {
    match ty {
        ColumnType::Integer => {
            col.integer();
        }
        ColumnType::BigInt => {
            col.big_integer();
        }
        ColumnType::Text => {
            col.text();
        }
        ColumnType::Boolean => {
            col.boolean();
        }
        ColumnType::Uuid => {
            col.uuid();
        }
    }
}

/// Convert showdown ReferenceAction to sea_query ForeignKeyAction
pub fn to_sea_fk_action(action: &ReferenceAction) -> ForeignKeyAction {
    match action {
        ReferenceAction::Cascade => ForeignKeyAction::Cascade,
        ReferenceAction::Restrict => ForeignKeyAction::Restrict,
        ReferenceAction::SetNull => ForeignKeyAction::SetNull,
        ReferenceAction::SetDefault => ForeignKeyAction::SetDefault,
        ReferenceAction::NoAction => ForeignKeyAction::NoAction,
    }
}

/// Build sea_query ColumnDef from showdown ColumnDef
pub fn build_sea_column_def(column: &ColumnDef) -> SeaColumnDef {
    let mut col = SeaColumnDef::new(Alias::new(&column.name));
    apply_column_type(&mut col, column.r#type);

    if column.nullable {
        col.null();
    } else {
        col.not_null();
    }

    col
}

/// Convert a seed literal into a bindable sea_query expression
pub fn to_sea_value(value: &SeedValue) -> SimpleExpr {
    match value {
        SeedValue::Null => SimpleExpr::Keyword(Keyword::Null),
        SeedValue::Integer(v) => SimpleExpr::Value((*v).into()),
        SeedValue::Boolean(v) => SimpleExpr::Value((*v).into()),
        SeedValue::Text(v) => SimpleExpr::Value(v.clone().into()),
        SeedValue::Uuid(v) => SimpleExpr::Value((*v).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sea_query::{Table, Value};

    #[rstest]
    #[case(ReferenceAction::Cascade, ForeignKeyAction::Cascade)]
    #[case(ReferenceAction::Restrict, ForeignKeyAction::Restrict)]
    #[case(ReferenceAction::SetNull, ForeignKeyAction::SetNull)]
    #[case(ReferenceAction::SetDefault, ForeignKeyAction::SetDefault)]
    #[case(ReferenceAction::NoAction, ForeignKeyAction::NoAction)]
    fn test_reference_action_conversion(
        #[case] action: ReferenceAction,
        #[case] expected: ForeignKeyAction,
    ) {
        assert!(matches!(
            (to_sea_fk_action(&action), expected),
            (ForeignKeyAction::Cascade, ForeignKeyAction::Cascade)
                | (ForeignKeyAction::Restrict, ForeignKeyAction::Restrict)
                | (ForeignKeyAction::SetNull, ForeignKeyAction::SetNull)
                | (ForeignKeyAction::SetDefault, ForeignKeyAction::SetDefault)
                | (ForeignKeyAction::NoAction, ForeignKeyAction::NoAction)
        ));
    }

    #[rstest]
    #[case::not_null(false, "NOT NULL")]
    #[case::nullable(true, "NULL")]
    fn test_column_nullability(#[case] nullable: bool, #[case] expected: &str) {
        let stmt = Table::create()
            .table(Alias::new("Posts"))
            .col(build_sea_column_def(&ColumnDef::new(
                "Content",
                ColumnType::Text,
                nullable,
            )))
            .to_owned();
        let sql = build_schema_statement(&stmt, DatabaseBackend::Sqlite);
        assert!(sql.contains(expected), "got: {sql}");
        if nullable {
            assert!(!sql.contains("NOT NULL"), "got: {sql}");
        }
    }

    #[test]
    fn test_seed_values() {
        assert!(matches!(
            to_sea_value(&SeedValue::Null),
            SimpleExpr::Keyword(Keyword::Null)
        ));
        assert!(matches!(
            to_sea_value(&SeedValue::Text("John Snow".into())),
            SimpleExpr::Value(Value::String(Some(_)))
        ));
        assert!(matches!(
            to_sea_value(&SeedValue::Uuid(uuid::Uuid::nil())),
            SimpleExpr::Value(Value::Uuid(Some(_)))
        ));
    }
}
