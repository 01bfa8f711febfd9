pub mod context;
pub mod entity;
pub mod error;
pub mod filter;
pub mod migration;
pub mod options;
pub mod report;

pub use context::{AppDb, UserWithPosts};
pub use error::{DbError, MigrationError, QueryError};
pub use filter::{ComputedFilter, FilterFn, UserFilter};
pub use options::{AppDbOptions, TranslationMode, default_version_table};
pub use report::{ReportRow, render, users_with_first_post};
