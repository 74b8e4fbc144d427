//! Show repository
//!
//! Shows are insert-only. Every listing joins venue and artist in the same
//! query; upcoming counts come from one grouped query per owner type.

use std::collections::HashMap;

use gigbook_core::{Now, Show, ShowFields, ShowListing};
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::db::error::{bounded, DbError};
use crate::db::pool::Session;

/// Show repository
pub struct ShowRepo<'a> {
    session: &'a mut Session,
}

impl<'a> ShowRepo<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self { session }
    }

    /// Book a show. Fails with a constraint violation when either id does not resolve.
    pub async fn insert(&mut self, fields: &ShowFields) -> Result<Show, DbError> {
        let limit = self.session.timeout();
        let row = bounded(
            limit,
            sqlx::query(
                r#"
                INSERT INTO shows (venue_id, artist_id, date_time)
                VALUES ($1, $2, $3)
                RETURNING id, venue_id, artist_id, date_time
                "#,
            )
            .bind(fields.venue_id)
            .bind(fields.artist_id)
            .bind(fields.start_time)
            .fetch_one(self.session.conn()),
        )
        .await?;

        let show = Show {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            artist_id: row.try_get("artist_id")?,
            date_time: row.try_get("date_time")?,
        };
        tracing::info!(
            show_id = show.id,
            venue_id = show.venue_id,
            artist_id = show.artist_id,
            "show inserted"
        );
        Ok(show)
    }

    /// Every show with venue and artist names, in one query.
    pub async fn list_all_with_joins(&mut self) -> Result<Vec<ShowListing>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT s.id, s.venue_id, s.artist_id, s.date_time,
                       v.name AS venue_name, v.image_link AS venue_image_link,
                       a.name AS artist_name, a.image_link AS artist_image_link
                FROM shows s
                JOIN venues v ON v.id = s.venue_id
                JOIN artists a ON a.id = s.artist_id
                ORDER BY s.date_time, s.id
                "#,
            )
            .fetch_all(self.session.conn()),
        )
        .await?;

        rows.iter().map(listing_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Shows booked at venue `venue_id`, oldest first.
    pub async fn for_venue(&mut self, venue_id: i64) -> Result<Vec<ShowListing>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT s.id, s.venue_id, s.artist_id, s.date_time,
                       v.name AS venue_name, v.image_link AS venue_image_link,
                       a.name AS artist_name, a.image_link AS artist_image_link
                FROM shows s
                JOIN venues v ON v.id = s.venue_id
                JOIN artists a ON a.id = s.artist_id
                WHERE s.venue_id = $1
                ORDER BY s.date_time, s.id
                "#,
            )
            .bind(venue_id)
            .fetch_all(self.session.conn()),
        )
        .await?;

        rows.iter().map(listing_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Shows played by artist `artist_id`, oldest first.
    pub async fn for_artist(&mut self, artist_id: i64) -> Result<Vec<ShowListing>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT s.id, s.venue_id, s.artist_id, s.date_time,
                       v.name AS venue_name, v.image_link AS venue_image_link,
                       a.name AS artist_name, a.image_link AS artist_image_link
                FROM shows s
                JOIN venues v ON v.id = s.venue_id
                JOIN artists a ON a.id = s.artist_id
                WHERE s.artist_id = $1
                ORDER BY s.date_time, s.id
                "#,
            )
            .bind(artist_id)
            .fetch_all(self.session.conn()),
        )
        .await?;

        rows.iter().map(listing_from_row).collect::<Result<_, _>>().map_err(DbError::from)
    }

    /// Upcoming show count per venue; venues without upcoming shows are absent.
    pub async fn count_upcoming_by_venue(&mut self, now: Now) -> Result<HashMap<i64, i64>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT venue_id AS owner_id, COUNT(*) AS upcoming
                FROM shows
                WHERE date_time > $1
                GROUP BY venue_id
                "#,
            )
            .bind(now.instant())
            .fetch_all(self.session.conn()),
        )
        .await?;

        counts_from_rows(&rows)
    }

    /// Upcoming show count per artist; artists without upcoming shows are absent.
    pub async fn count_upcoming_by_artist(
        &mut self,
        now: Now,
    ) -> Result<HashMap<i64, i64>, DbError> {
        let limit = self.session.timeout();
        let rows = bounded(
            limit,
            sqlx::query(
                r#"
                SELECT artist_id AS owner_id, COUNT(*) AS upcoming
                FROM shows
                WHERE date_time > $1
                GROUP BY artist_id
                "#,
            )
            .bind(now.instant())
            .fetch_all(self.session.conn()),
        )
        .await?;

        counts_from_rows(&rows)
    }

    /// Total number of shows.
    pub async fn count(&mut self) -> Result<i64, DbError> {
        let limit = self.session.timeout();
        let (total,): (i64,) = bounded(
            limit,
            sqlx::query_as("SELECT COUNT(*) FROM shows").fetch_one(self.session.conn()),
        )
        .await?;
        Ok(total)
    }
}

fn listing_from_row(row: &PgRow) -> Result<ShowListing, sqlx::Error> {
    Ok(ShowListing {
        show: Show {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            artist_id: row.try_get("artist_id")?,
            date_time: row.try_get("date_time")?,
        },
        venue_name: row.try_get("venue_name")?,
        venue_image_link: row.try_get("venue_image_link")?,
        artist_name: row.try_get("artist_name")?,
        artist_image_link: row.try_get("artist_image_link")?,
    })
}

fn counts_from_rows(rows: &[PgRow]) -> Result<HashMap<i64, i64>, DbError> {
    rows.iter()
        .map(|r| -> Result<(i64, i64), sqlx::Error> {
            Ok((r.try_get("owner_id")?, r.try_get("upcoming")?))
        })
        .collect::<Result<_, _>>()
        .map_err(DbError::from)
}
