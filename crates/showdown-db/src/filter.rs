//! User filters as values the query layer can inspect.
//!
//! A [`UserFilter`] is either lowered into a SQL condition with
//! [`UserFilter::lower`] or evaluated against loaded rows with
//! [`UserFilter::evaluate`]. Only [`UserFilter::Computed`] resists lowering;
//! what happens then is decided by [`TranslationMode`](crate::TranslationMode).

use std::fmt;
use std::ops::Not;

use sea_orm::sea_query::{Alias, Expr, Func, FunctionCall, Query, SimpleExpr};
use sea_orm::{Condition, DbBackend};

use crate::entity::{post, user};
use crate::error::QueryError;

/// In-memory predicate over a user and all of its posts.
pub type FilterFn = fn(&user::Model, &[post::Model]) -> bool;

/// An opaque Rust predicate. It can only run after rows are loaded.
#[derive(Clone, Copy)]
pub struct ComputedFilter {
    name: &'static str,
    eval: FilterFn,
}

impl ComputedFilter {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ComputedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedFilter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum UserFilter {
    /// The user owns at least one post.
    HasPosts,
    /// The user's name has more than this many characters.
    NameLongerThan(usize),
    /// Every inner filter holds. Empty means always true.
    All(Vec<UserFilter>),
    Not(Box<UserFilter>),
    Computed(ComputedFilter),
}

impl UserFilter {
    pub fn computed(name: &'static str, eval: FilterFn) -> Self {
        UserFilter::Computed(ComputedFilter { name, eval })
    }

    pub fn and(self, other: UserFilter) -> Self {
        match self {
            UserFilter::All(mut filters) => {
                filters.push(other);
                UserFilter::All(filters)
            }
            filter => UserFilter::All(vec![filter, other]),
        }
    }

    /// Name of the first computed filter in the tree, if any.
    pub fn untranslatable(&self) -> Option<&'static str> {
        match self {
            UserFilter::HasPosts | UserFilter::NameLongerThan(_) => None,
            UserFilter::All(filters) => filters.iter().find_map(UserFilter::untranslatable),
            UserFilter::Not(inner) => inner.untranslatable(),
            UserFilter::Computed(computed) => Some(computed.name),
        }
    }

    /// Lower the filter into a SQL condition over `Users`.
    ///
    /// Fails with [`QueryError::Untranslatable`] when any part of the tree is
    /// computed; nothing is partially lowered.
    pub fn lower(&self, backend: DbBackend) -> Result<Condition, QueryError> {
        match self {
            UserFilter::HasPosts => Ok(Condition::all().add(has_posts())),
            UserFilter::NameLongerThan(n) => {
                // Saturates instead of wrapping.
                let n = i64::try_from(*n).unwrap_or(i64::MAX);
                Ok(Condition::all().add(Expr::expr(name_length(backend)).gt(n)))
            }
            UserFilter::All(filters) => filters.iter().try_fold(
                Condition::all(),
                |cond, f| -> Result<Condition, QueryError> { Ok(cond.add(f.lower(backend)?)) },
            ),
            UserFilter::Not(inner) => Ok(inner.lower(backend)?.not()),
            UserFilter::Computed(computed) => {
                Err(QueryError::Untranslatable(computed.name.to_string()))
            }
        }
    }

    /// Evaluate the filter against a loaded user and all of its posts.
    pub fn evaluate(&self, user: &user::Model, posts: &[post::Model]) -> bool {
        match self {
            UserFilter::HasPosts => posts.iter().any(|p| p.user_id == user.id),
            UserFilter::NameLongerThan(n) => user.name.chars().count() > *n,
            UserFilter::All(filters) => filters.iter().all(|f| f.evaluate(user, posts)),
            UserFilter::Not(inner) => !inner.evaluate(user, posts),
            UserFilter::Computed(computed) => (computed.eval)(user, posts),
        }
    }
}

impl Not for UserFilter {
    type Output = UserFilter;

    fn not(self) -> Self::Output {
        UserFilter::Not(Box::new(self))
    }
}

fn has_posts() -> SimpleExpr {
    Expr::exists(
        Query::select()
            .expr(Expr::val(1))
            .from(post::Entity)
            .and_where(
                Expr::col((post::Entity, post::Column::UserId))
                    .equals((user::Entity, user::Column::Id)),
            )
            .to_owned(),
    )
}

// SQLite has no CHAR_LENGTH; its LENGTH already counts characters for text.
fn name_length(backend: DbBackend) -> FunctionCall {
    let name = Expr::col((user::Entity, user::Column::Name));
    match backend {
        DbBackend::Sqlite => Func::cust(Alias::new("LENGTH")).arg(name),
        DbBackend::Postgres | DbBackend::MySql => Func::char_length(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{PostgresQueryBuilder, SqliteQueryBuilder};
    use sea_orm::{EntityTrait, QueryFilter, QueryTrait};
    use sea_orm::prelude::Uuid;

    fn select_sql(filter: &UserFilter, backend: DbBackend) -> String {
        let query = user::Entity::find()
            .filter(filter.lower(backend).unwrap())
            .into_query();
        match backend {
            DbBackend::Postgres => query.to_string(PostgresQueryBuilder),
            _ => query.to_string(SqliteQueryBuilder),
        }
    }

    fn user(name: &str) -> user::Model {
        user::Model {
            id: Uuid::from_u128(1),
            name: name.to_string(),
        }
    }

    fn post_of(owner: &user::Model) -> post::Model {
        post::Model {
            id: Uuid::from_u128(100),
            user_id: owner.id,
            content: Some("Winter is coming".into()),
        }
    }

    #[test]
    fn test_has_posts_lowers_to_correlated_exists() {
        let sql = select_sql(&UserFilter::HasPosts, DbBackend::Sqlite);
        assert!(sql.contains("EXISTS"), "got: {sql}");
        assert!(sql.contains(r#"FROM "Posts""#), "got: {sql}");
        assert!(sql.contains(r#""Posts"."UserId" = "Users"."Id""#), "got: {sql}");
    }

    #[test]
    fn test_name_length_sqlite() {
        let sql = select_sql(&user::has_long_name(), DbBackend::Sqlite);
        assert!(sql.contains("LENGTH("), "got: {sql}");
        assert!(!sql.contains("CHAR_LENGTH"), "got: {sql}");
        assert!(sql.contains(r#""Users"."Name") > 10"#), "got: {sql}");
    }

    #[test]
    fn test_name_length_postgres() {
        let sql = select_sql(&user::has_long_name(), DbBackend::Postgres);
        assert!(sql.contains("CHAR_LENGTH("), "got: {sql}");
        assert!(sql.contains(r#""Users"."Name") > 10"#), "got: {sql}");
    }

    #[test]
    fn test_huge_threshold_saturates() {
        let sql = select_sql(&UserFilter::NameLongerThan(usize::MAX), DbBackend::Sqlite);
        assert!(sql.contains(&format!("> {}", i64::MAX)), "got: {sql}");
        assert!(!sql.contains("> -"), "got: {sql}");
    }

    #[test]
    fn test_not_lowers_to_not() {
        let sql = select_sql(&!UserFilter::HasPosts, DbBackend::Sqlite);
        assert!(sql.contains("NOT"), "got: {sql}");
    }

    #[test]
    fn test_computed_is_untranslatable() {
        let filter = UserFilter::HasPosts.and(user::has_long_name_computed());
        assert_eq!(filter.untranslatable(), Some("has_long_name"));
        match filter.lower(DbBackend::Sqlite) {
            Err(QueryError::Untranslatable(name)) => assert_eq!(name, "has_long_name"),
            other => panic!("expected untranslatable filter, got {other:?}"),
        }
    }

    #[test]
    fn test_computed_nested_under_not_is_untranslatable() {
        let filter = !user::has_long_name_computed();
        assert!(filter.lower(DbBackend::Postgres).is_err());
    }

    #[test]
    fn test_and_flattens() {
        let filter = UserFilter::HasPosts
            .and(user::has_long_name())
            .and(UserFilter::NameLongerThan(3));
        match filter {
            UserFilter::All(filters) => assert_eq!(filters.len(), 3),
            other => panic!("expected All, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate() {
        let sarah = user("Sarah Connor");
        let posts = vec![post_of(&sarah)];
        let filter = UserFilter::HasPosts.and(user::has_long_name());

        assert!(filter.evaluate(&sarah, &posts));
        assert!(!filter.evaluate(&sarah, &[]));
        assert!(!filter.evaluate(&user("John Snow"), &posts));
        assert!(UserFilter::All(vec![]).evaluate(&sarah, &[]));
        assert!((!UserFilter::HasPosts).evaluate(&sarah, &[]));
    }

    #[test]
    fn test_computed_debug_names_the_filter() {
        let debug = format!("{:?}", user::has_long_name_computed());
        assert!(debug.contains("has_long_name"));
    }
}
