//! Home page

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Landing page: where each listing lives
#[derive(Serialize)]
pub struct HomePage {
    pub venues: &'static str,
    pub artists: &'static str,
    pub shows: &'static str,
}

/// GET /
async fn home() -> Json<HomePage> {
    Json(HomePage {
        venues: "/venues",
        artists: "/artists",
        shows: "/shows",
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}
