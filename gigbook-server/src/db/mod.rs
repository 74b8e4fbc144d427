//! Database layer - connection pool, sessions and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - One transaction per request; drop without commit rolls back
//! - Every storage call runs under a deadline
//! - All list operations use JOINs or grouped counts - no N+1 queries
//! - Rely on DB constraints, handle violations - no check-then-insert

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use error::DbError;
pub use pool::{DatabaseConfig, Session, Store};
pub use repos::{ArtistRepo, ShowRepo, VenueRepo};
pub use seed::{seed_if_empty, SeedReport};
