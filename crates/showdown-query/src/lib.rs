pub mod builder;
pub mod error;
pub mod sql;

pub use builder::{build_plan_queries, build_revert_queries};
pub use error::QueryError;
pub use sql::{BuiltQuery, DatabaseBackend, build_action_queries};
