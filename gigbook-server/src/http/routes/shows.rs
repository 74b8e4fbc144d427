//! Show endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use gigbook_core::{Now, Show, ShowFields, ShowForm, ShowView};

use super::Notice;
use crate::db::DbError;
use crate::http::error::ApiError;
use crate::http::extractors::Submitted;
use crate::http::server::AppState;

/// GET /shows - every show with venue and artist, one joined query
async fn list_shows(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ShowView>>, ApiError> {
    let mut session = state.store.begin().await?;
    let shows = session.shows().list_all_with_joins().await?;
    session.commit().await?;

    Ok(Json(shows.iter().map(ShowView::from).collect()))
}

/// GET /shows/create - blank form, start time defaulting to now
async fn create_show_form() -> Json<ShowForm> {
    Json(ShowForm::blank(Now::capture()))
}

/// POST /shows/create - book a show (`venue_id`, `artist_id`, `start_time`)
async fn create_show(
    State(state): State<Arc<AppState>>,
    Submitted(form): Submitted,
) -> Result<(StatusCode, Json<Notice>), ApiError> {
    let fields = ShowFields::parse(&form)?;

    let written: Result<Show, DbError> = async {
        let mut session = state.store.begin().await?;
        let show = session.shows().insert(&fields).await?;
        session.commit().await?;
        Ok::<_, DbError>(show)
    }
    .await;

    let show = written.map_err(|e| {
        ApiError::from(e).with_notice("An error occurred. Show could not be listed.")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(Notice::new("Show was successfully listed!").with_id(show.id)),
    ))
}

/// Show routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
