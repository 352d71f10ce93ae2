use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::entities::{
    administrators, airline_companies, airports, countries, customers, flights, tickets,
    user_roles, users,
};

pub mod error;
pub mod migrator;
pub mod repositories;
mod repository;

pub use error::{DataError, DataResult};
pub use repositories::AirportMatch;
pub use repository::{Repository, Table};

/// Owns the connection pool. Constructed by the entry point with
/// [`Store::connect`] and torn down with [`Store::close`].
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        Self::with_pool_options(
            &config.url,
            config.max_connections,
            config.min_connections,
            Duration::from_secs(config.connect_timeout_seconds),
        )
        .await
    }

    /// Opens an in-memory database with migrations applied.
    pub async fn in_memory() -> Result<Self> {
        Self::with_pool_options("sqlite::memory:", 1, 1, Duration::from_secs(10)).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
        connect_timeout: Duration,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(connect_timeout)
            .acquire_timeout(connect_timeout)
            .sqlx_logging(false);

        if is_memory_url(db_url) {
            // Every pooled connection would get its own private database.
            opt.max_connections(1).min_connections(1);
        } else {
            prepare_sqlite_file(db_url).await?;
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to {db_url}"))?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .context("Failed to close database connection")?;
        info!("Database connection closed");
        Ok(())
    }

    /// Closes the pool, then hands back `result`. A close failure is only
    /// reported when `result` itself succeeded.
    pub async fn finish<T>(self, result: Result<T>) -> Result<T> {
        let closed = self.close().await;
        let value = result?;
        closed?;
        Ok(value)
    }

    #[must_use]
    pub fn user_roles(&self) -> Repository<user_roles::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn users(&self) -> Repository<users::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn countries(&self) -> Repository<countries::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn airports(&self) -> Repository<airports::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn customers(&self) -> Repository<customers::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn administrators(&self) -> Repository<administrators::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn airline_companies(&self) -> Repository<airline_companies::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn flights(&self) -> Repository<flights::Entity> {
        Repository::new(self.conn.clone())
    }

    #[must_use]
    pub fn tickets(&self) -> Repository<tickets::Entity> {
        Repository::new(self.conn.clone())
    }
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// SQLite will not create missing parent directories on its own.
async fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    let Some(path_str) = db_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path_str = path_str.trim_start_matches("//");
    let path_str = path_str.split('?').next().unwrap_or(path_str);
    let path = Path::new(path_str);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    if !path.exists() {
        tokio::fs::File::create(path)
            .await
            .with_context(|| format!("Failed to create database file {}", path.display()))?;
    }
    Ok(())
}
