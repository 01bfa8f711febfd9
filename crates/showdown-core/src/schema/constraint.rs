use serde::{Deserialize, Serialize};

use crate::schema::{
    ReferenceAction,
    names::{ColumnName, TableName},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TableConstraint {
    PrimaryKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        columns: Vec<ColumnName>,
    },
    ForeignKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        columns: Vec<ColumnName>,
        ref_table: TableName,
        ref_columns: Vec<ColumnName>,
        #[serde(default)]
        on_delete: Option<ReferenceAction>,
        #[serde(default)]
        on_update: Option<ReferenceAction>,
    },
}

impl TableConstraint {
    pub fn columns(&self) -> &[ColumnName] {
        match self {
            TableConstraint::PrimaryKey { columns, .. } => columns,
            TableConstraint::ForeignKey { columns, .. } => columns,
        }
    }

    /// Name of the constraint as created in the database, falling back to the
    /// conventional `PK_`/`FK_` name when none was given.
    pub fn resolved_name(&self, table: &str) -> String {
        match self {
            TableConstraint::PrimaryKey { name: Some(n), .. }
            | TableConstraint::ForeignKey { name: Some(n), .. } => n.clone(),
            TableConstraint::PrimaryKey { name: None, .. } => {
                showdown_naming::build_primary_key_name(table)
            }
            TableConstraint::ForeignKey {
                name: None,
                columns,
                ref_table,
                ..
            } => showdown_naming::build_foreign_key_name(table, ref_table, columns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_from_json() {
        let json = r#"{
            "type": "foreign_key",
            "columns": ["UserId"],
            "ref_table": "Users",
            "ref_columns": ["Id"],
            "on_delete": "cascade"
        }"#;
        let fk: TableConstraint = serde_json::from_str(json).unwrap();
        assert_eq!(
            fk,
            TableConstraint::ForeignKey {
                name: None,
                columns: vec!["UserId".into()],
                ref_table: "Users".into(),
                ref_columns: vec!["Id".into()],
                on_delete: Some(ReferenceAction::Cascade),
                on_update: None,
            }
        );
        assert_eq!(fk.resolved_name("Posts"), "FK_Posts_Users_UserId");
    }

    #[test]
    fn test_explicit_name_wins() {
        let pk = TableConstraint::PrimaryKey {
            name: Some("users_pkey".into()),
            columns: vec!["Id".into()],
        };
        assert_eq!(pk.resolved_name("Users"), "users_pkey");
        assert_eq!(pk.columns(), &["Id".to_string()]);
    }

    #[test]
    fn test_primary_key_default_name() {
        let pk = TableConstraint::PrimaryKey {
            name: None,
            columns: vec!["Id".into()],
        };
        assert_eq!(pk.resolved_name("Users"), "PK_Users");
    }
}
