use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("migration version {0} must be greater than previous version {1}")]
    VersionOrder(u32, u32),
    #[error("table already exists: {0}")]
    TableExists(String),
    #[error("table not found: {0}")]
    TableNotFound(String),
    #[error("table '{0}' is still referenced by '{1}'")]
    TableReferenced(String, String),
    #[error("duplicate column: {0}.{1}")]
    DuplicateColumn(String, String),
    #[error("column not found: {0}.{1}")]
    ColumnNotFound(String, String),
    #[error("table '{0}' must have a primary key")]
    MissingPrimaryKey(String),
    #[error("constraint has empty column list: {0}")]
    EmptyConstraintColumns(String),
    #[error("foreign key references non-existent table: {0} -> {1}")]
    ForeignKeyTableNotFound(String, String),
    #[error("foreign key references non-existent column: {0} -> {1}.{2}")]
    ForeignKeyColumnNotFound(String, String, String),
    #[error("foreign key column count mismatch: {0} -> {1}")]
    ForeignKeyArity(String, String),
    #[error("seed row {row} for table '{table}' has {actual} values, expected {expected}")]
    SeedRowWidth {
        table: String,
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("seed value does not match column type: {0}.{1}")]
    SeedTypeMismatch(String, String),
    #[error("NULL seed value for NOT NULL column: {0}.{1}")]
    NullInRequiredColumn(String, String),
    #[error("empty text seed value for NOT NULL column: {0}.{1}")]
    EmptyRequiredText(String, String),
    #[error("seed data omits NOT NULL column: {0}.{1}")]
    MissingRequiredColumn(String, String),
    #[error("duplicate primary key in seed data for table: {0}")]
    DuplicateSeedKey(String),
    #[error("seed row in '{0}' references a row missing from '{1}'")]
    DanglingSeedReference(String, String),
}
