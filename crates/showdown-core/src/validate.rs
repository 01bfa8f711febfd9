use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::schema::{
    ColumnDef, ColumnName, ColumnType, IndexDef, SeedValue, TableConstraint, TableDef, TableName,
};
use crate::{MigrationAction, MigrationPlan};

type SeedRow = HashMap<ColumnName, SeedValue>;

/// Validate an ordered list of migration plans.
/// Replays every action against an in-memory snapshot and checks:
/// - Versions strictly increase
/// - Tables are created once, with unique columns and a primary key
/// - Constraints and indexes reference existing tables and columns
/// - Seed rows match their column list, types and nullability
/// - Required text columns are never seeded empty
/// - Seeded primary keys are unique and seeded foreign keys resolve
/// - Each plan's `down` actions replay cleanly on top of that plan
pub fn validate_plans(plans: &[MigrationPlan]) -> Result<(), ValidationError> {
    let mut replay = Replay::default();
    let mut previous = 0;
    for plan in plans {
        if plan.version <= previous {
            return Err(ValidationError::VersionOrder(plan.version, previous));
        }
        previous = plan.version;

        for action in &plan.actions {
            replay.apply(action)?;
        }

        let mut undo = replay.clone();
        for action in &plan.down {
            undo.apply(action)?;
        }
    }
    Ok(())
}

#[derive(Default, Clone)]
struct Replay {
    tables: Vec<TableDef>,
    rows: HashMap<TableName, Vec<SeedRow>>,
}

impl Replay {
    fn table(&self, name: &str) -> Result<&TableDef, ValidationError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| ValidationError::TableNotFound(name.to_string()))
    }

    fn apply(&mut self, action: &MigrationAction) -> Result<(), ValidationError> {
        match action {
            MigrationAction::CreateTable {
                table,
                columns,
                constraints,
            } => self.create_table(table, columns, constraints),
            MigrationAction::AddIndex { table, index } => self.add_index(table, index),
            MigrationAction::InsertData {
                table,
                columns,
                rows,
            } => self.insert_data(table, columns, rows),
            MigrationAction::DropTable { table } => self.drop_table(table),
        }
    }

    fn drop_table(&mut self, table: &str) -> Result<(), ValidationError> {
        self.table(table)?;
        let referencing = self.tables.iter().find(|t| {
            t.name != table
                && t.foreign_keys().any(|fk| {
                    matches!(fk, TableConstraint::ForeignKey { ref_table, .. } if ref_table == table)
                })
        });
        if let Some(other) = referencing {
            return Err(ValidationError::TableReferenced(
                table.to_string(),
                other.name.clone(),
            ));
        }
        self.tables.retain(|t| t.name != table);
        self.rows.remove(table);
        Ok(())
    }

    fn create_table(
        &mut self,
        table: &str,
        columns: &[ColumnDef],
        constraints: &[TableConstraint],
    ) -> Result<(), ValidationError> {
        if self.tables.iter().any(|t| t.name == table) {
            return Err(ValidationError::TableExists(table.to_string()));
        }

        let mut seen = HashSet::new();
        for column in columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ValidationError::DuplicateColumn(
                    table.to_string(),
                    column.name.clone(),
                ));
            }
        }

        let def = TableDef {
            name: table.to_string(),
            columns: columns.to_vec(),
            constraints: constraints.to_vec(),
            indexes: Vec::new(),
        };
        if def.primary_key().is_none() {
            return Err(ValidationError::MissingPrimaryKey(table.to_string()));
        }

        for constraint in constraints {
            let name = constraint.resolved_name(table);
            if constraint.columns().is_empty() {
                return Err(ValidationError::EmptyConstraintColumns(name));
            }
            for col in constraint.columns() {
                if !def.has_column(col) {
                    return Err(ValidationError::ColumnNotFound(
                        table.to_string(),
                        col.clone(),
                    ));
                }
            }
            if let TableConstraint::ForeignKey {
                columns: fk_cols,
                ref_table,
                ref_columns,
                ..
            } = constraint
            {
                // Self references resolve against the table being created.
                let target = if ref_table == table {
                    &def
                } else {
                    self.tables
                        .iter()
                        .find(|t| &t.name == ref_table)
                        .ok_or_else(|| {
                            ValidationError::ForeignKeyTableNotFound(name.clone(), ref_table.clone())
                        })?
                };
                if fk_cols.len() != ref_columns.len() {
                    return Err(ValidationError::ForeignKeyArity(name, ref_table.clone()));
                }
                for col in ref_columns {
                    if !target.has_column(col) {
                        return Err(ValidationError::ForeignKeyColumnNotFound(
                            name,
                            ref_table.clone(),
                            col.clone(),
                        ));
                    }
                }
            }
        }

        self.tables.push(def);
        Ok(())
    }

    fn add_index(&mut self, table: &str, index: &IndexDef) -> Result<(), ValidationError> {
        let def = self.table(table)?;
        if index.columns.is_empty() {
            return Err(ValidationError::EmptyConstraintColumns(
                index.resolved_name(table),
            ));
        }
        for col in &index.columns {
            if !def.has_column(col) {
                return Err(ValidationError::ColumnNotFound(table.to_string(), col.clone()));
            }
        }
        if let Some(def) = self.tables.iter_mut().find(|t| t.name == table) {
            def.indexes.push(index.clone());
        }
        Ok(())
    }

    fn insert_data(
        &mut self,
        table: &str,
        columns: &[ColumnName],
        rows: &[Vec<SeedValue>],
    ) -> Result<(), ValidationError> {
        let def = self.table(table)?.clone();

        let mut targets = Vec::with_capacity(columns.len());
        for name in columns {
            let column = def
                .column(name)
                .ok_or_else(|| ValidationError::ColumnNotFound(table.to_string(), name.clone()))?;
            targets.push(column);
        }
        if let Some(missing) = def
            .columns
            .iter()
            .find(|c| !c.nullable && !columns.contains(&c.name))
        {
            return Err(ValidationError::MissingRequiredColumn(
                table.to_string(),
                missing.name.clone(),
            ));
        }

        let mut parsed = Vec::with_capacity(rows.len());
        for (i, values) in rows.iter().enumerate() {
            if values.len() != targets.len() {
                return Err(ValidationError::SeedRowWidth {
                    table: table.to_string(),
                    row: i,
                    expected: targets.len(),
                    actual: values.len(),
                });
            }
            let mut row = SeedRow::new();
            for (column, value) in targets.iter().zip(values) {
                check_value(table, column, value)?;
                row.insert(column.name.clone(), value.clone());
            }
            parsed.push(row);
        }

        for row in &parsed {
            self.check_primary_key(&def, row, &parsed)?;
            self.check_foreign_keys(&def, row)?;
        }

        self.rows.entry(table.to_string()).or_default().extend(parsed);
        Ok(())
    }

    fn check_primary_key(
        &self,
        def: &TableDef,
        row: &SeedRow,
        batch: &[SeedRow],
    ) -> Result<(), ValidationError> {
        let Some(pk) = def.primary_key() else {
            return Ok(());
        };
        let key = project(row, pk);
        let existing = self.rows.get(&def.name).map(Vec::as_slice).unwrap_or(&[]);
        let occurrences = existing
            .iter()
            .chain(batch)
            .filter(|other| project(other, pk) == key)
            .count();
        if occurrences > 1 {
            return Err(ValidationError::DuplicateSeedKey(def.name.clone()));
        }
        Ok(())
    }

    fn check_foreign_keys(&self, def: &TableDef, row: &SeedRow) -> Result<(), ValidationError> {
        for fk in def.foreign_keys() {
            let TableConstraint::ForeignKey {
                columns,
                ref_table,
                ref_columns,
                ..
            } = fk
            else {
                continue;
            };
            let key = project(row, columns);
            if key.iter().any(|v| v.is_null()) {
                continue;
            }
            let parents = self.rows.get(ref_table).map(Vec::as_slice).unwrap_or(&[]);
            if !parents.iter().any(|parent| project(parent, ref_columns) == key) {
                return Err(ValidationError::DanglingSeedReference(
                    def.name.clone(),
                    ref_table.clone(),
                ));
            }
        }
        Ok(())
    }
}

fn check_value(table: &str, column: &ColumnDef, value: &SeedValue) -> Result<(), ValidationError> {
    if !value.fits(column.r#type) {
        return Err(ValidationError::SeedTypeMismatch(
            table.to_string(),
            column.name.clone(),
        ));
    }
    if column.nullable {
        return Ok(());
    }
    match value {
        SeedValue::Null => Err(ValidationError::NullInRequiredColumn(
            table.to_string(),
            column.name.clone(),
        )),
        SeedValue::Text(text) if column.r#type == ColumnType::Text && text.is_empty() => Err(
            ValidationError::EmptyRequiredText(table.to_string(), column.name.clone()),
        ),
        _ => Ok(()),
    }
}

/// Values of `columns` in `row`; absent columns read as NULL.
fn project(row: &SeedRow, columns: &[ColumnName]) -> Vec<SeedValue> {
    columns
        .iter()
        .map(|c| row.get(c).cloned().unwrap_or(SeedValue::Null))
        .collect()
}
