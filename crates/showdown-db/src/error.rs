use sea_orm::DbErr;
use showdown_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection string is not set")]
    MissingConnectionString,
    #[error("database connection error: {0}")]
    Connection(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to parse migration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid migration plan: {0}")]
    Validation(#[from] ValidationError),
    #[error("failed to build migration SQL: {0}")]
    Build(#[from] showdown_query::QueryError),
    #[error("applied version {0} has no matching migration plan")]
    UnknownVersion(u32),
    #[error("migration version {0} has no down actions")]
    Irreversible(u32),
    #[error("migration database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("filter `{0}` cannot be translated to SQL and client-side evaluation is disabled")]
    Untranslatable(String),
    #[error("query database error: {0}")]
    Database(#[from] DbErr),
}
