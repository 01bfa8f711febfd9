pub mod action;
pub mod error;
pub mod schema;
pub mod validate;

pub use action::{MigrationAction, MigrationPlan};
pub use error::ValidationError;
pub use schema::{
    ColumnDef, ColumnName, ColumnType, IndexDef, IndexName, ReferenceAction, SeedValue,
    TableConstraint, TableDef, TableName,
};
pub use validate::validate_plans;
