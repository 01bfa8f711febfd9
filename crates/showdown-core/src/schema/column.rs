use serde::{Deserialize, Serialize};

use crate::schema::names::ColumnName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColumnDef {
    pub name: ColumnName,
    pub r#type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<ColumnName>, r#type: ColumnType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            r#type,
            nullable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    BigInt,
    Text,
    Boolean,
    Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ColumnType::Integer, "\"integer\"")]
    #[case(ColumnType::BigInt, "\"big_int\"")]
    #[case(ColumnType::Text, "\"text\"")]
    #[case(ColumnType::Boolean, "\"boolean\"")]
    #[case(ColumnType::Uuid, "\"uuid\"")]
    fn test_column_type_serde_name(#[case] ty: ColumnType, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&ty).unwrap(), expected);
    }

    #[test]
    fn test_column_def_uses_type_key() {
        let json = r#"{ "name": "Name", "type": "text", "nullable": false }"#;
        let col: ColumnDef = serde_json::from_str(json).unwrap();
        assert_eq!(col, ColumnDef::new("Name", ColumnType::Text, false));
    }
}
