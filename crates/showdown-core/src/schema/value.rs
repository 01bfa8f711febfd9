use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schema::ColumnType;

/// A literal inserted by a seed action.
///
/// Serialized externally tagged so a UUID is never confused with text:
/// `{"uuid": "b32b790d-..."}`, `{"text": "John Snow"}`, `"null"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedValue {
    Null,
    Integer(i64),
    Boolean(bool),
    Text(String),
    Uuid(Uuid),
}

impl SeedValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SeedValue::Null)
    }

    /// Whether this value can be stored in a column of the given type.
    /// `Null` fits every type; nullability is checked separately.
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (SeedValue::Null, _)
                | (SeedValue::Integer(_), ColumnType::Integer | ColumnType::BigInt)
                | (SeedValue::Boolean(_), ColumnType::Boolean)
                | (SeedValue::Text(_), ColumnType::Text)
                | (SeedValue::Uuid(_), ColumnType::Uuid)
        )
    }
}
