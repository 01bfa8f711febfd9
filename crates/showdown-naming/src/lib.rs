//! Naming conventions for database objects of the showdown schema.
//!
//! Names follow the `PK_`/`FK_`/`IX_` convention: the object kind, the owning
//! table, then whatever distinguishes the object within that table. The crate
//! has no dependencies and is used by the migration model and the SQL builder.

/// Generate primary key constraint name.
/// Format: PK_{table}
///
/// # Examples
/// ```
/// use showdown_naming::build_primary_key_name;
///
/// assert_eq!(build_primary_key_name("Users"), "PK_Users");
/// ```
pub fn build_primary_key_name(table: &str) -> String {
    format!("PK_{}", table)
}

/// Generate foreign key constraint name from the owning table, the referenced
/// table and the owning columns.
/// Format: FK_{table}_{ref_table}_{col1}_{col2}...
///
/// # Examples
/// ```
/// use showdown_naming::build_foreign_key_name;
///
/// assert_eq!(
///     build_foreign_key_name("Posts", "Users", &["UserId".into()]),
///     "FK_Posts_Users_UserId"
/// );
/// ```
pub fn build_foreign_key_name(table: &str, ref_table: &str, columns: &[String]) -> String {
    format!("FK_{}_{}_{}", table, ref_table, columns.join("_"))
}

/// Generate index name from table name and indexed columns.
/// Format: IX_{table}_{col1}_{col2}...
///
/// # Examples
/// ```
/// use showdown_naming::build_index_name;
///
/// assert_eq!(build_index_name("Posts", &["UserId".into()]), "IX_Posts_UserId");
/// ```
pub fn build_index_name(table: &str, columns: &[String]) -> String {
    format!("IX_{}_{}", table, columns.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_primary_key_name() {
        assert_eq!(build_primary_key_name("Users"), "PK_Users");
        assert_eq!(build_primary_key_name("Posts"), "PK_Posts");
    }

    #[test]
    fn test_build_foreign_key_name_single_column() {
        assert_eq!(
            build_foreign_key_name("Posts", "Users", &["UserId".into()]),
            "FK_Posts_Users_UserId"
        );
    }

    #[test]
    fn test_build_foreign_key_name_composite() {
        assert_eq!(
            build_foreign_key_name(
                "Comments",
                "Posts",
                &["PostId".into(), "PostVersion".into()]
            ),
            "FK_Comments_Posts_PostId_PostVersion"
        );
    }

    #[test]
    fn test_build_index_name() {
        assert_eq!(build_index_name("Posts", &["UserId".into()]), "IX_Posts_UserId");
        assert_eq!(
            build_index_name("Posts", &["UserId".into(), "Id".into()]),
            "IX_Posts_UserId_Id"
        );
    }
}
