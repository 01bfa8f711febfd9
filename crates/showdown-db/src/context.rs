use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, QueryTrait,
};
use tracing::{debug, warn};

use crate::entity::{post, user};
use crate::error::{DbError, MigrationError, QueryError};
use crate::filter::UserFilter;
use crate::migration::{embedded_migrations, revert_latest, run_migrations};
use crate::options::{AppDbOptions, TranslationMode};

/// A user together with all of its posts, ordered by post `Id`.
pub type UserWithPosts = (user::Model, Vec<post::Model>);

/// Open connection to the showdown schema.
///
/// One `AppDb` covers one migrate-then-query cycle. Call [`AppDb::close`]
/// when done.
#[derive(Debug)]
pub struct AppDb {
    conn: DatabaseConnection,
    options: AppDbOptions,
}

impl AppDb {
    pub async fn connect(options: AppDbOptions) -> Result<Self, DbError> {
        let url = options
            .connection_string
            .as_deref()
            .ok_or(DbError::MissingConnectionString)?;

        // A single connection keeps `sqlite::memory:` on one database.
        let mut connect = ConnectOptions::new(url);
        connect
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let conn = Database::connect(connect).await?;
        debug!(backend = ?conn.get_database_backend(), "connected");

        Ok(Self { conn, options })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub fn options(&self) -> &AppDbOptions {
        &self.options
    }

    pub fn backend(&self) -> DbBackend {
        self.conn.get_database_backend()
    }

    /// Bring the schema and seed data up to the latest embedded version.
    /// Returns the versions applied by this call.
    pub async fn migrate(&self) -> Result<Vec<u32>, MigrationError> {
        let plans = embedded_migrations()?;
        run_migrations(&self.conn, &plans, &self.options.version_table).await
    }

    /// Undo the most recently applied migration and drop its history row.
    /// Returns the reverted version, or `None` when nothing is applied.
    pub async fn revert(&self) -> Result<Option<u32>, MigrationError> {
        let plans = embedded_migrations()?;
        revert_latest(&self.conn, &plans, &self.options.version_table).await
    }

    /// Users matching `filter`, each with all of its posts.
    pub async fn find_users(&self, filter: &UserFilter) -> Result<Vec<UserWithPosts>, QueryError> {
        let condition = match filter.lower(self.backend()) {
            Ok(condition) => Some(condition),
            Err(QueryError::Untranslatable(name))
                if self.options.translation == TranslationMode::Permissive =>
            {
                warn!(
                    filter = %name,
                    "filter cannot be translated to SQL; loading every user and filtering in memory"
                );
                None
            }
            Err(err) => return Err(err),
        };

        let mut select = user::Entity::find();
        if let Some(condition) = &condition {
            select = select.filter(condition.clone());
        }
        let select = select
            .find_with_related(post::Entity)
            .order_by_asc(user::Column::Id)
            .order_by_asc(post::Column::Id);
        debug!(sql = %select.build(self.backend()), "executing user query");
        let mut rows = select.all(&self.conn).await?;

        if condition.is_none() {
            rows.retain(|(user, posts)| filter.evaluate(user, posts));
        }
        Ok(rows)
    }

    pub async fn close(self) -> Result<(), DbError> {
        self.conn.close().await?;
        Ok(())
    }
}
