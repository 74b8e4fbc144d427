//! Artist endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use gigbook_core::{
    Artist, ArtistDetail, ArtistFields, ArtistForm, Now, SearchResults, ShortView,
};

use super::Notice;
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::{RecordId, Submitted};
use crate::http::server::AppState;

/// GET /artists - every artist with its upcoming show count
async fn list_artists(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ShortView>>, ApiError> {
    let now = Now::capture();
    let mut session = state.store.begin().await?;
    let artists = session.artists().list_all().await?;
    let upcoming = session.shows().count_upcoming_by_artist(now).await?;
    session.commit().await?;

    Ok(Json(
        artists.iter().map(|a| ShortView::artist(a, &upcoming)).collect(),
    ))
}

/// POST /artists/search - case-insensitive name search (`search_term`)
async fn search_artists(
    State(state): State<Arc<AppState>>,
    Submitted(form): Submitted,
) -> Result<Json<SearchResults>, ApiError> {
    let term = form.text("search_term");
    let now = Now::capture();

    let mut session = state.store.begin().await?;
    let artists = session.artists().search(&term).await?;
    let upcoming = session.shows().count_upcoming_by_artist(now).await?;
    session.commit().await?;

    let data = artists.iter().map(|a| ShortView::artist(a, &upcoming)).collect();
    Ok(Json(SearchResults::new(term, data)))
}

/// GET /artists/{id} - artist page with upcoming/past shows
async fn show_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistDetail>, ApiError> {
    let now = Now::capture();
    let mut session = state.store.begin().await?;
    let artist = session
        .artists()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("artist", id))?;
    let shows = session.shows().for_artist(id).await?;
    session.commit().await?;

    Ok(Json(ArtistDetail::build(artist, &shows, now)))
}

/// GET /artists/create
async fn create_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::blank())
}

/// POST /artists/create
async fn create_artist(
    State(state): State<Arc<AppState>>,
    Submitted(form): Submitted,
) -> Result<(StatusCode, Json<Notice>), ApiError> {
    let fields = ArtistFields::parse(&form)?;

    let written: Result<Artist, DbError> = async {
        let mut session = state.store.begin().await?;
        let artist = session.artists().insert(&fields).await?;
        session.commit().await?;
        Ok::<_, DbError>(artist)
    }
    .await;

    let artist = written.map_err(|e| {
        ApiError::from(e).with_notice(format!(
            "An error occurred. Artist {} could not be listed.",
            fields.name
        ))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(
            Notice::new(format!("Artist {} was successfully listed!", artist.name))
                .with_id(artist.id),
        ),
    ))
}

/// GET /artists/{id}/edit
async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Json<ArtistForm>, ApiError> {
    let mut session = state.store.begin().await?;
    let artist = session
        .artists()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("artist", id))?;
    session.commit().await?;

    Ok(Json(ArtistForm::edit(&artist)))
}

/// POST /artists/{id}/edit
async fn edit_artist(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Submitted(form): Submitted,
) -> Result<Redirect, ApiError> {
    let fields = ArtistFields::parse(&form)?;

    let updated: Result<Option<Artist>, DbError> = async {
        let mut session = state.store.begin().await?;
        let artist = session.artists().update(id, &fields).await?;
        session.commit().await?;
        Ok::<_, DbError>(artist)
    }
    .await;

    updated
        .map_err(|e| {
            ApiError::from(e).with_notice(format!(
                "An error occurred. Artist {} could not be updated.",
                fields.name
            ))
        })?
        .ok_or_else(|| ApiError::not_found("artist", id))?;

    Ok(Redirect::to(&format!("/artists/{id}")))
}

/// Artist routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
        .route("/artists/{id}/edit", get(edit_artist_form).post(edit_artist))
}
