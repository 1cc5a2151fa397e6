use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::controller::{FeedController, FeedSnapshot};
use crate::sector::{Sector, SectorEntry, SECTORS};

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedController>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/sectors", get(list_sectors))
        .route("/api/feed", get(get_feed))
        .route("/api/sector", post(select_sector))
        .route("/api/feed/retry", post(retry_feed))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct SelectReq {
    sector: String,
}

#[derive(Serialize)]
struct ErrorResp {
    error: String,
}

async fn list_sectors() -> Json<&'static [SectorEntry]> {
    Json(&SECTORS[..])
}

async fn get_feed(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(state.feed.snapshot())
}

async fn select_sector(State(state): State<AppState>, Json(body): Json<SelectReq>) -> Response {
    let sector: Sector = match body.sector.parse() {
        Ok(s) => s,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResp {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };
    Json(state.feed.select_sector(sector).await).into_response()
}

async fn retry_feed(State(state): State<AppState>) -> Json<FeedSnapshot> {
    Json(state.feed.retry().await)
}
