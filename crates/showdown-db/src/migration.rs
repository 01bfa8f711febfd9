use sea_orm::sea_query::{
    Alias, ColumnDef as SeaColumnDef, Expr, Query, SimpleExpr, Table,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement, TransactionTrait};
use showdown_core::{MigrationPlan, validate_plans};
use showdown_query::{BuiltQuery, DatabaseBackend, build_plan_queries, build_revert_queries};
use tracing::{debug, info};

use crate::error::MigrationError;

const VERSION_COLUMN: &str = "version";
const COMMENT_COLUMN: &str = "comment";

/// Migration plans compiled into the binary, oldest first.
const EMBEDDED: &[(&str, &str)] = &[
    (
        "0001_initial.json",
        include_str!("../migrations/0001_initial.json"),
    ),
    (
        "0002_add_posts.json",
        include_str!("../migrations/0002_add_posts.json"),
    ),
];

/// Parse, order and validate the embedded migration plans.
pub fn embedded_migrations() -> Result<Vec<MigrationPlan>, MigrationError> {
    let mut plans = Vec::with_capacity(EMBEDDED.len());
    for (file, source) in EMBEDDED {
        let plan: MigrationPlan = serde_json::from_str(source)?;
        debug!(file, version = plan.version, "loaded embedded migration");
        plans.push(plan);
    }
    plans.sort_by_key(|p| p.version);
    validate_plans(&plans)?;
    Ok(plans)
}

pub fn to_query_backend(backend: DbBackend) -> DatabaseBackend {
    match backend {
        DbBackend::Postgres => DatabaseBackend::Postgres,
        DbBackend::MySql => DatabaseBackend::MySql,
        DbBackend::Sqlite => DatabaseBackend::Sqlite,
    }
}

fn to_statement(backend: DbBackend, query: &BuiltQuery) -> Statement {
    match query {
        BuiltQuery::CreateTable(stmt) => backend.build(stmt.as_ref()),
        BuiltQuery::CreateIndex(stmt) => backend.build(stmt.as_ref()),
        BuiltQuery::Insert(stmt) => backend.build(stmt.as_ref()),
        BuiltQuery::DropTable(stmt) => backend.build(stmt.as_ref()),
    }
}

async fn ensure_history_table(
    db: &DatabaseConnection,
    version_table: &str,
) -> Result<(), MigrationError> {
    let backend = db.get_database_backend();
    let create_history = Table::create()
        .table(Alias::new(version_table))
        .if_not_exists()
        .col(
            SeaColumnDef::new(Alias::new(VERSION_COLUMN))
                .integer()
                .not_null()
                .primary_key(),
        )
        .col(SeaColumnDef::new(Alias::new(COMMENT_COLUMN)).text().null())
        .to_owned();
    db.execute(backend.build(&create_history)).await?;
    Ok(())
}

/// Apply every plan newer than the highest version recorded in
/// `version_table`, each inside its own transaction.
///
/// Returns the versions applied by this call; empty when the schema is
/// already current.
pub async fn run_migrations(
    db: &DatabaseConnection,
    plans: &[MigrationPlan],
    version_table: &str,
) -> Result<Vec<u32>, MigrationError> {
    let backend = db.get_database_backend();
    ensure_history_table(db, version_table).await?;

    let current = current_version(db, version_table).await?;
    let pending: Vec<&MigrationPlan> = plans.iter().filter(|p| p.version > current).collect();
    if pending.is_empty() {
        info!(version = current, "schema is up to date");
        return Ok(Vec::new());
    }

    let query_backend = to_query_backend(backend);
    let mut applied = Vec::with_capacity(pending.len());
    for plan in pending {
        let queries = build_plan_queries(&query_backend, plan)?;

        let txn = db.begin().await?;
        for query in &queries {
            debug!(version = plan.version, sql = %query.build(query_backend), "executing migration statement");
            txn.execute(to_statement(backend, query)).await?;
        }
        txn.execute(backend.build(&record_version(version_table, plan)?))
            .await?;
        txn.commit().await?;

        info!(
            version = plan.version,
            comment = plan.comment.as_deref().unwrap_or(""),
            statements = queries.len(),
            "applied migration"
        );
        applied.push(plan.version);
    }

    Ok(applied)
}

/// Undo the highest recorded version with its plan's `down` actions and
/// remove its history row, all in one transaction.
pub async fn revert_latest(
    db: &DatabaseConnection,
    plans: &[MigrationPlan],
    version_table: &str,
) -> Result<Option<u32>, MigrationError> {
    let backend = db.get_database_backend();
    ensure_history_table(db, version_table).await?;

    let current = current_version(db, version_table).await?;
    if current == 0 {
        info!("no applied migration to revert");
        return Ok(None);
    }
    let plan = plans
        .iter()
        .find(|p| p.version == current)
        .ok_or(MigrationError::UnknownVersion(current))?;
    if plan.down.is_empty() {
        return Err(MigrationError::Irreversible(current));
    }

    let query_backend = to_query_backend(backend);
    let queries = build_revert_queries(&query_backend, plan)?;

    let txn = db.begin().await?;
    for query in &queries {
        debug!(version = current, sql = %query.build(query_backend), "executing revert statement");
        txn.execute(to_statement(backend, query)).await?;
    }
    let forget = Query::delete()
        .from_table(Alias::new(version_table))
        .and_where(Expr::col(Alias::new(VERSION_COLUMN)).eq(current as i32))
        .to_owned();
    txn.execute(backend.build(&forget)).await?;
    txn.commit().await?;

    info!(version = current, "reverted migration");
    Ok(Some(current))
}

async fn current_version(
    db: &DatabaseConnection,
    version_table: &str,
) -> Result<u32, MigrationError> {
    let backend = db.get_database_backend();
    let select = Query::select()
        .expr_as(
            Expr::col(Alias::new(VERSION_COLUMN)).max(),
            Alias::new(VERSION_COLUMN),
        )
        .from(Alias::new(version_table))
        .to_owned();

    let version = match db.query_one(backend.build(&select)).await? {
        Some(row) => row.try_get::<Option<i32>>("", VERSION_COLUMN)?,
        None => None,
    };
    Ok(version.map_or(0, |v| v.max(0) as u32))
}

fn record_version(
    version_table: &str,
    plan: &MigrationPlan,
) -> Result<sea_orm::sea_query::InsertStatement, showdown_query::QueryError> {
    let mut insert = Query::insert();
    insert
        .into_table(Alias::new(version_table))
        .columns([Alias::new(VERSION_COLUMN), Alias::new(COMMENT_COLUMN)])
        .values([
            SimpleExpr::Value((plan.version as i32).into()),
            SimpleExpr::Value(plan.comment.clone().into()),
        ])
        .map_err(|e| showdown_query::QueryError::InvalidRow {
            table: version_table.to_string(),
            reason: e.to_string(),
        })?;
    Ok(insert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::{MigrationAction, SeedValue};

    #[test]
    fn test_embedded_migrations_parse_in_order() {
        let plans = embedded_migrations().unwrap();
        let versions: Vec<u32> = plans.iter().map(|p| p.version).collect();
        assert_eq!(versions, vec![1, 2]);
        assert_eq!(plans[0].comment.as_deref(), Some("initial"));
        assert_eq!(plans[1].comment.as_deref(), Some("add_posts"));
    }

    #[test]
    fn test_embedded_seed_rows() {
        let plans = embedded_migrations().unwrap();
        let seeded: Vec<(&str, usize)> = plans
            .iter()
            .flat_map(|p| &p.actions)
            .filter_map(|a| match a {
                MigrationAction::InsertData { table, rows, .. } => Some((table.as_str(), rows.len())),
                _ => None,
            })
            .collect();
        assert_eq!(seeded, vec![("Users", 2), ("Posts", 2)]);
    }

    #[test]
    fn test_post_ids_are_pinned() {
        let plans = embedded_migrations().unwrap();
        let post_ids: Vec<String> = plans[1]
            .actions
            .iter()
            .filter_map(|a| match a {
                MigrationAction::InsertData { rows, .. } => Some(rows),
                _ => None,
            })
            .flatten()
            .filter_map(|row| match row.first() {
                Some(SeedValue::Uuid(id)) => Some(id.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            post_ids,
            vec![
                "880200b0-21fc-4a48-8588-12f0556df6d4",
                "62b935d6-6d3e-4aeb-97c9-0242645b751b",
            ]
        );
    }

    #[test]
    fn test_every_embedded_plan_is_reversible() {
        let plans = embedded_migrations().unwrap();
        let dropped: Vec<(u32, &str)> = plans
            .iter()
            .flat_map(|p| p.down.iter().map(move |a| (p.version, a.table())))
            .collect();
        assert_eq!(dropped, vec![(1, "Users"), (2, "Posts")]);
    }

    #[test]
    fn test_record_version_sql() {
        let plan = MigrationPlan {
            version: 2,
            comment: Some("add_posts".into()),
            actions: vec![],
            down: vec![],
        };
        let insert = record_version("__migrations_history", &plan).unwrap();
        let sql = DbBackend::Sqlite.build(&insert).to_string();
        assert!(sql.contains("\"__migrations_history\""), "got: {sql}");
        assert!(sql.contains("'add_posts'"), "got: {sql}");
    }
}
