use showdown_core::MigrationPlan;

use crate::error::QueryError;
use crate::sql::{BuiltQuery, DatabaseBackend, build_action_queries};

pub fn build_plan_queries(
    backend: &DatabaseBackend,
    plan: &MigrationPlan,
) -> Result<Vec<BuiltQuery>, QueryError> {
    let mut queries: Vec<BuiltQuery> = Vec::new();
    for action in &plan.actions {
        queries.extend(build_action_queries(backend, action)?);
    }
    Ok(queries)
}

/// Statements undoing `plan`, built from its `down` actions.
pub fn build_revert_queries(
    backend: &DatabaseBackend,
    plan: &MigrationPlan,
) -> Result<Vec<BuiltQuery>, QueryError> {
    let mut queries: Vec<BuiltQuery> = Vec::new();
    for action in &plan.down {
        queries.extend(build_action_queries(backend, action)?);
    }
    Ok(queries)
}
