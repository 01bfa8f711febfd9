use serde::{Deserialize, Serialize};

use crate::schema::{
    column::ColumnDef, constraint::TableConstraint, index::IndexDef, names::TableName,
};

/// Snapshot of a table after replaying migration actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TableDef {
    pub name: TableName,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    pub indexes: Vec<IndexDef>,
}

impl TableDef {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn primary_key(&self) -> Option<&[String]> {
        self.constraints.iter().find_map(|c| match c {
            TableConstraint::PrimaryKey { columns, .. } => Some(columns.as_slice()),
            _ => None,
        })
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &TableConstraint> {
        self.constraints
            .iter()
            .filter(|c| matches!(c, TableConstraint::ForeignKey { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnType, ReferenceAction};

    fn posts() -> TableDef {
        TableDef {
            name: "Posts".into(),
            columns: vec![
                ColumnDef::new("Id", ColumnType::Uuid, false),
                ColumnDef::new("UserId", ColumnType::Uuid, false),
                ColumnDef::new("Content", ColumnType::Text, true),
            ],
            constraints: vec![
                TableConstraint::PrimaryKey {
                    name: None,
                    columns: vec!["Id".into()],
                },
                TableConstraint::ForeignKey {
                    name: None,
                    columns: vec!["UserId".into()],
                    ref_table: "Users".into(),
                    ref_columns: vec!["Id".into()],
                    on_delete: Some(ReferenceAction::Cascade),
                    on_update: None,
                },
            ],
            indexes: vec![],
        }
    }

    #[test]
    fn test_column_lookup() {
        let table = posts();
        assert!(table.has_column("Content"));
        assert!(!table.has_column("Title"));
        assert!(table.column("Content").unwrap().nullable);
    }

    #[test]
    fn test_primary_key_and_foreign_keys() {
        let table = posts();
        assert_eq!(table.primary_key(), Some(&["Id".to_string()][..]));
        assert_eq!(table.foreign_keys().count(), 1);
    }
}
