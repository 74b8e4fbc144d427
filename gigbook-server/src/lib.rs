//! gigbook-server: storage and HTTP surface for the gigbook listing site
//!
//! Venues, artists and the shows that connect them, kept in PostgreSQL and
//! served as JSON pages.

pub mod db;
pub mod http;

pub use db::{DatabaseConfig, DbError, Session, Store};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
