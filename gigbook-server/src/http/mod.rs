//! HTTP layer
//!
//! Axum server with:
//! - One storage session per request
//! - JSON pages for listings, details and forms
//! - JSON error pages with flash notices
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
