pub mod column;
pub mod constraint;
pub mod index;
pub mod names;
pub mod reference;
pub mod table;
pub mod value;

pub use column::{ColumnDef, ColumnType};
pub use constraint::TableConstraint;
pub use index::IndexDef;
pub use names::{ColumnName, IndexName, TableName};
pub use reference::ReferenceAction;
pub use table::TableDef;
pub use value::SeedValue;
