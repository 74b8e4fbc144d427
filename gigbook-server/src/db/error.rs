//! Storage failure taxonomy
//!
//! A lookup miss is not an error here: repositories return `Option`/`bool`
//! for it. What remains is integrity failures, connectivity failures and
//! anything unexpected from the driver.

use std::future::Future;
use std::time::Duration;

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Unique, foreign key, not-null or check constraint rejected the write
    #[error("constraint violation on {constraint}: {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Connection lost, pool exhausted or a call ran past its deadline
    #[error("storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("database error: {0}")]
    Query(sqlx::Error),
}

impl DbError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if let Some(label) = constraint_label(db.kind()) {
                return Self::ConstraintViolation {
                    constraint: db.constraint().unwrap_or(label).to_owned(),
                    message: db.message().to_owned(),
                };
            }
            if db.code().is_some_and(|code| unavailable_sqlstate(&code)) {
                return Self::StorageUnavailable {
                    reason: err.to_string(),
                };
            }
        }

        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::StorageUnavailable {
                reason: err.to_string(),
            },
            other => Self::Query(other),
        }
    }
}

fn constraint_label(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::UniqueViolation => Some("unique"),
        ErrorKind::ForeignKeyViolation => Some("foreign key"),
        ErrorKind::NotNullViolation => Some("not null"),
        ErrorKind::CheckViolation => Some("check"),
        _ => None,
    }
}

/// SQLSTATEs that mean the server or the transaction is gone rather than
/// the statement being wrong: connection exceptions (08), insufficient
/// resources (53), operator intervention (57P0x), transaction rollback (40)
/// and an already aborted transaction (25P02).
fn unavailable_sqlstate(code: &str) -> bool {
    code.starts_with("08")
        || code.starts_with("53")
        || code.starts_with("57P0")
        || code.starts_with("40")
        || code == "25P02"
}

/// Run one storage call under a deadline; expiry counts as unavailable.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(DbError::from),
        Err(_) => Err(DbError::StorageUnavailable {
            reason: format!("storage call exceeded {}ms", limit.as_millis()),
        }),
    }
}
