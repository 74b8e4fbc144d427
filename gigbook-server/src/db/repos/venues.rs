//! Venue repository
//!
//! - get/update: point lookup by id, `None` on a miss
//! - list_all: every row, ordered by (state, city) so areas come out together
//! - search: case-insensitive substring match on name
//! - delete: rejected by the shows foreign key while the venue has shows

use gigbook_core::{Venue, VenueFields};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::contains_pattern;
use crate::db::error::{bounded, DbError};
use crate::db::pool::Session;

/// Venue repository
pub struct VenueRepo<'a> {
    session: &'a mut Session,
}

impl<'a> VenueRepo<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    pub async fn get(&mut self, id: i64) -> Result<Option<Venue>, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, address, phone, image_link,
                       facebook_link, website, genres, seeking_talent, seeking_description
                FROM venues
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.session.conn()),
        )
        .await?;

        row.as_ref().map(venue_from_row).transpose().map_err(DbError::from)
    }

    pub async fn list_all(&mut self) -> Result<Vec<Venue>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, address, phone, image_link,
                       facebook_link, website, genres, seeking_talent, seeking_description
                FROM venues
                ORDER BY state, city, id
                "#,
            )
            .fetch_all(self.session.conn()),
        )
        .await?;

        rows.iter().map(venue_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Venues whose name contains `term`, ignoring case. An empty term matches all.
    pub async fn search(&mut self, term: &str) -> Result<Vec<Venue>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT id, name, city, state, address, phone, image_link,
                       facebook_link, website, genres, seeking_talent, seeking_description
                FROM venues
                WHERE name ILIKE $1 ESCAPE '\'
                ORDER BY name, id
                "#,
            )
            .bind(contains_pattern(term))
            .fetch_all(self.session.conn()),
        )
        .await?;

        tracing::debug!(term, matches = rows.len(), "venue search");
        rows.iter().map(venue_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    pub async fn insert(&mut self, fields: &VenueFields) -> Result<Venue, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                INSERT INTO venues
                    (name, city, state, address, phone, image_link,
                     facebook_link, website, genres, seeking_talent, seeking_description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING id, name, city, state, address, phone, image_link,
                          facebook_link, website, genres, seeking_talent, seeking_description
                "#,
            )
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(&fields.genres)
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .fetch_one(self.session.conn()),
        )
        .await?;

        let venue = venue_from_row(&row)?;
        tracing::info!(venue_id = venue.id, name = %venue.name, "venue inserted");
        Ok(venue)
    }

    /// Overwrite every mutable column of venue `id`.
    pub async fn update(&mut self, id: i64, fields: &VenueFields) -> Result<Option<Venue>, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                UPDATE venues SET
                    name = $2, city = $3, state = $4, address = $5, phone = $6,
                    image_link = $7, facebook_link = $8, website = $9, genres = $10,
                    seeking_talent = $11, seeking_description = $12
                WHERE id = $1
                RETURNING id, name, city, state, address, phone, image_link,
                          facebook_link, website, genres, seeking_talent, seeking_description
                "#,
            )
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.city)
            .bind(&fields.state)
            .bind(&fields.address)
            .bind(&fields.phone)
            .bind(&fields.image_link)
            .bind(&fields.facebook_link)
            .bind(&fields.website)
            .bind(&fields.genres)
            .bind(fields.seeking_talent)
            .bind(&fields.seeking_description)
            .fetch_optional(self.session.conn()),
        )
        .await?;

        let venue = row.as_ref().map(venue_from_row).transpose()?;
        if venue.is_some() {
            tracing::info!(venue_id = id, "venue updated");
        }
        Ok(venue)
    }

    /// Whether at least one venue is stored.
    pub async fn any(&mut self) -> Result<bool, DbError> {
        let limit = self.session.timeout();
        let (present,): (bool,) = bounded(
            limit,
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM venues)").fetch_one(self.session.conn()),
        )
        .await?;
        Ok(present)
    }

    /// Remove venue `id`. `false` when there was nothing to remove.
    pub async fn delete(&mut self, id: i64) -> Result<bool, DbError> {
        let limit = self.session.timeout();
        let result = bounded(
            limit,
            sqlx::query("DELETE FROM venues WHERE id = $1").execute(self.session.conn()),
        )
        .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(venue_id = id, "venue deleted");
        }
        Ok(removed)
    }
}

fn venue_from_row(row: &PgRow) -> Result<Venue, sqlx::Error> {
    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        address: row.try_get("address")?,
        phone: row.try_get("phone")?,
        image_link: row.try_get("image_link")?,
        facebook_link: row.try_get("facebook_link")?,
        website: row.try_get("website")?,
        genres: row.try_get("genres")?,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
    })
}
