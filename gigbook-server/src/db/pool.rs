//! Connection pool and per-request sessions
//!
//! One request maps to one `Session`, which is one transaction. Committing is
//! explicit; a session dropped on any other path (an early `?`, a panic, a
//! timeout) rolls back and returns its connection to the pool.

use std::time::Duration;

use sqlx::postgres::{PgConnection, PgPoolOptions};
use sqlx::{PgPool, Postgres, Transaction};

use super::error::{bounded, DbError};
use super::repos::{ArtistRepo, ShowRepo, VenueRepo};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a free connection.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for a single storage call.
const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Storage handle injected into the application state
#[derive(Clone)]
pub struct Store {
    pool: PgPool,
    statement_timeout: Duration,
}

impl Store {
    /// Open the pool and verify a connection can be made.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let store = Store::connect(&DatabaseConfig::new("postgres://localhost/gigbook")).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let pool = config.pool_options().connect(&config.url).await?;
        tracing::info!(max_connections = config.max_connections, "database pool ready");
        Ok(Self::from_pool(pool, config.statement_timeout))
    }

    /// Build the pool without connecting; the first session opens a connection.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DbError> {
        let pool = config.pool_options().connect_lazy(&config.url)?;
        Ok(Self::from_pool(pool, config.statement_timeout))
    }

    pub fn from_pool(pool: PgPool, statement_timeout: Duration) -> Self {
        Self {
            pool,
            statement_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn statement_timeout(&self) -> Duration {
        self.statement_timeout
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbError> {
        bounded(
            self.statement_timeout,
            sqlx::query("SELECT 1").execute(&self.pool),
        )
        .await?;
        Ok(())
    }

    /// Acquire a connection and open a transaction.
    pub async fn begin(&self) -> Result<Session, DbError> {
        let tx = bounded(self.statement_timeout, self.pool.begin()).await?;
        Ok(Session {
            tx,
            timeout: self.statement_timeout,
        })
    }
}

/// A transaction scoped to one request
pub struct Session {
    tx: Transaction<'static, Postgres>,
    timeout: Duration,
}

impl Session {
    pub fn venues(&mut self) -> VenueRepo<'_> {
        VenueRepo::new(self)
    }

    pub fn artists(&mut self) -> ArtistRepo<'_> {
        ArtistRepo::new(self)
    }

    pub fn shows(&mut self) -> ShowRepo<'_> {
        ShowRepo::new(self)
    }

    pub async fn commit(self) -> Result<(), DbError> {
        bounded(self.timeout, self.tx.commit()).await
    }

    /// Roll back explicitly. Dropping the session has the same effect.
    pub async fn rollback(self) -> Result<(), DbError> {
        bounded(self.timeout, self.tx.rollback()).await
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}
