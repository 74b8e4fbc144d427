//! Venue endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use gigbook_core::{
    group_by_area, Now, SearchResults, ShortView, Venue, VenueArea, VenueDetail,
    VenueFields, VenueForm,
};

use super::Notice;
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, Submitted};
use crate::http::server::AppState;

/// GET /venues - every venue, grouped by city
async fn list_venues(State(state): State<Arc<AppState>>) -> Result<Json<Vec<VenueArea>>, ApiError> {
    let now = Now::capture();
    let mut session = state.store.begin().await?;
    let venues = session.venues().list_all().await?;
    let upcoming = session.shows().count_upcoming_by_venue(now).await?;
    session.commit().await?;

    Ok(Json(group_by_area(&venues, &upcoming)))
}

/// POST /venues/search - case-insensitive name search (`search_term`)
async fn search_venues(
    State(state): State<Arc<AppState>>,
    Submitted(form): Submitted,
) -> Result<Json<SearchResults>, ApiError> {
    let term = form.text("search_term");
    let now = Now::capture();

    let mut session = state.store.begin().await?;
    let venues = session.venues().search(&term).await?;
    let upcoming = session.shows().count_upcoming_by_venue(now).await?;
    session.commit().await?;

    let data = venues.iter().map(|v| ShortView::venue(v, &upcoming)).collect();
    Ok(Json(SearchResults::new(term, data)))
}

/// GET /venues/{id} - venue page with upcoming/past shows
async fn show_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenueDetail>, ApiError> {
    let now = Now::capture();
    let mut session = state.store.begin().await?;
    let venue = session
        .venues()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("venue", id))?;
    let shows = session.shows().for_venue(id).await?;
    session.commit().await?;

    Ok(Json(VenueDetail::build(venue, &shows, now)))
}

/// GET /venues/create - blank form
async fn create_venue_form() -> Json<VenueForm> {
    Json(VenueForm::blank())
}

/// POST /venues/create - list a new venue
async fn create_venue(
    State(state): State<Arc<AppState>>,
    Submitted(form): Submitted,
) -> Result<(StatusCode, Json<Notice>), ApiError> {
    let fields = VenueFields::parse(&form)?;

    let written: Result<Venue, DbError> = async {
        let mut session = state.store.begin().await?;
        let venue = session.venues().insert(&fields).await?;
        session.commit().await?;
        Ok::<_, DbError>(venue)
    }
    .await;

    let venue = written.map_err(|e| {
        ApiError::from(e).with_notice(format!(
            "An error occurred. Venue {} could not be listed.",
            fields.name
        ))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(Notice::new(format!("Venue {} was successfully listed!", venue.name)).with_id(venue.id)),
    ))
}

/// DELETE /venues/{id} - remove a venue without shows
async fn delete_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<Notice>, ApiError> {
    let removed: Result<Option<Venue>, DbError> = async {
        let mut session = state.store.begin().await?;
        let Some(venue) = session.venues().get(id).await? else {
            return Ok(None);
        };
        if !session.venues().delete(id).await? {
            return Ok(None);
        }
        session.commit().await?;
        Ok::<_, DbError>(Some(venue))
    }
    .await;

    let venue = removed
        .map_err(|e| {
            ApiError::from(e).with_notice(format!("An error occurred. Venue {} could not be deleted.", id))
        })?
        .ok_or_else(|| ApiError::not_found("venue", id))?;

    Ok(Json(Notice::new(format!("Venue {} was successfully deleted!", venue.name)).with_id(venue.id)))
}

/// GET /venues/{id}/edit - form pre-filled with the stored values
async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<VenueForm>, ApiError> {
    let mut session = state.store.begin().await?;
    let venue = session
        .venues()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("venue", id))?;
    session.commit().await?;

    Ok(Json(VenueForm::edit(&venue)))
}

/// POST /venues/{id}/edit - overwrite every field, then go to the venue page
async fn edit_venue(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Submitted(form): Submitted,
) -> Result<Redirect, ApiError> {
    let fields = VenueFields::parse(&form)?;

    let updated: Result<Option<Venue>, DbError> = async {
        let mut session = state.store.begin().await?;
        let venue = session.venues().update(id, &fields).await?;
        session.commit().await?;
        Ok::<_, DbError>(venue)
    }
    .await;

    updated
        .map_err(|e| {
            ApiError::from(e).with_notice(format!(
                "An error occurred. Venue {} could not be updated.",
                fields.name
            ))
        })?
        .ok_or_else(|| ApiError::not_found("venue", id))?;

    Ok(Redirect::to(&format!("/venues/{id}")))
}

/// Venue routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue).delete(delete_venue))
        .route("/venues/{id}/edit", get(edit_venue_form).post(edit_venue))
}
