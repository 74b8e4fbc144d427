//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::db::DbError;
use crate::http::server::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn from_ping(ping: &Result<(), DbError>) -> (StatusCode, Self) {
        let (code, status, database) = match ping {
            Ok(()) => (StatusCode::OK, "ok", "ok"),
            Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable"),
        };
        (
            code,
            Self {
                status,
                database,
                version: env!("CARGO_PKG_VERSION"),
            },
        )
    }
}

/// GET /health
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let ping = state.store.ping().await;
    if let Err(e) = &ping {
        tracing::warn!("health check failed: {}", e);
    }
    let (code, body) = HealthResponse::from_ping(&ping);
    (code, Json(body))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_when_ping_succeeds() {
        let (code, body) = HealthResponse::from_ping(&Ok(()));
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[test]
    fn degraded_when_storage_is_down() {
        let ping = Err(DbError::StorageUnavailable {
            reason: "connection refused".into(),
        });
        let (code, body) = HealthResponse::from_ping(&ping);
        assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.database, "unavailable");
    }
}
