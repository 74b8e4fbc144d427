//! Route modules and shared response types

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::http::Uri;
use serde::Serialize;

use super::error::ApiError;

/// Flash-style confirmation of a write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub flash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Notice {
    pub fn new(flash: impl Into<String>) -> Self {
        Self {
            flash: flash.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("page", uri.path())
}
