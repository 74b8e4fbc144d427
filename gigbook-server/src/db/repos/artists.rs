//! Artist repository
//!
//! Same lookup/search/write contract as venues. Artists have no delete path.

use gigbook_core::{Artist, ArtistFields};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::contains_pattern;
use crate::db::error::{bounded, DbError};
use crate::db::pool::Session;

/// Artist repository
pub struct ArtistRepo<'a> {
    session: &'a mut Session,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    pub async fn get(&mut self, id: i64) -> Result<Option<Artist>, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, phone, image_link, facebook_link,
                       website, genres, seeking_venue, seeking_description
                FROM artists
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.session.conn()),
        )
        .await?;

        row.as_ref().map(artist_from_row).transpose().map_err(DbError::from)
    }

    pub async fn list_all(&mut self) -> Result<Vec<Artist>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, phone, image_link, facebook_link,
                       website, genres, seeking_venue, seeking_description
                FROM artists
                ORDER BY id
                "#,
            )
            .fetch_all(self.session.conn()),
        )
        .await?;

        rows.iter().map(artist_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Artists whose name contains `term`, ignoring case. An empty term matches all.
    pub async fn search(&mut self, term: &str) -> Result<Vec<Artist>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, phone, image_link, facebook_link,
                       website, genres, seeking_venue, seeking_description
                FROM artists
                WHERE name ILIKE $1 ESCAPE '\'
                ORDER BY name, id
                "#,
            )
            .bind(contains_pattern(term))
            .fetch_all(self.session.conn()),
        )
        .await?;

        tracing::debug!(term, matches = rows.len(), "artist search");
        rows.iter().map(artist_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    pub async fn insert(&mut self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                INSERT INTO artists
                    (name, city, state, phone, image_link, facebook_link,
                     website, genres, seeking_venue, seeking_description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id, name, city, state, phone, image_link, facebook_link,
                          website, genres, seeking_venue, seeking_description
                "#,
            )
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(&fields.genres)
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .fetch_one(self.session.conn()),
        )
        .await?;

        let artist = artist_from_row(&row)?;
        tracing::info!(artist_id = artist.id, name = %artist.name, "artist inserted");
        Ok(artist)
    }

    /// Overwrite every mutable column of artist `id`.
    pub async fn update(
        &mut self,
        id: i64,
        fields: &ArtistFields,
    ) -> Result<Option<Artist>, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                UPDATE artists SET
                    name = $2, city = $3, state = $4, phone = $5, image_link = $6,
                    facebook_link = $7, website = $8, genres = $9,
                    seeking_venue = $10, seeking_description = $11
                WHERE id = $1
                RETURNING id, name, city, state, phone, image_link, facebook_link,
                          website, genres, seeking_venue, seeking_description
                "#,
            )
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(&fields.genres)
            .bind(fields.seeking_venue)
            .bind(&fields.seeking_description)
            .fetch_optional(self.session.conn()),
        )
        .await?;

        let artist = row.as_ref().map(artist_from_row).transpose()?;
        if artist.is_some() {
            tracing::info!(artist_id = id, "artist updated");
        }
        Ok(artist)
    }
}

fn artist_from_row(row: &PgRow) -> Result<Artist, sqlx::Error> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website: row.try_get("website")?,
        genres: row.try_get("genres")?,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}
