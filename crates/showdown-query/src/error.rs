use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid seed row for table '{table}': {reason}")]
    InvalidRow { table: String, reason: String },
}
