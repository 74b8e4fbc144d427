//! Schema migrations
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so running on startup is safe.

use sqlx::PgPool;

use super::error::DbError;

/// Create the venues, artists and shows tables.
///
/// Shows reference both parents with `ON DELETE RESTRICT`: a venue or artist
/// with shows on the books can't be removed.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            city TEXT NOT NULL CHECK (btrim(city) <> ''),
            state TEXT NOT NULL CHECK (btrim(state) <> ''),
            address TEXT NOT NULL CHECK (btrim(address) <> ''),
            phone TEXT NOT NULL DEFAULT '',
            image_link TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            name TEXT NOT NULL CHECK (btrim(name) <> ''),
            city TEXT NOT NULL CHECK (btrim(city) <> ''),
            state TEXT NOT NULL CHECK (btrim(state) <> ''),
            phone TEXT NOT NULL DEFAULT '',
            image_link TEXT NOT NULL DEFAULT '',
            facebook_link TEXT NOT NULL DEFAULT '',
            website TEXT NOT NULL DEFAULT '',
            genres TEXT[] NOT NULL DEFAULT '{}',
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE RESTRICT,
            artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE RESTRICT,
            date_time TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id, date_time)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id, date_time)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
