// src/api.rs
// HTTP surface: read-only snapshot endpoints plus the city update. Served by
// axum; permissive CORS so the separate frontend can call it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::store::{CityCell, ClassifiedItem, NewsStore};

#[derive(Clone)]
pub struct AppState {
    store: Arc<NewsStore>,
    city: Arc<CityCell>,
}

impl AppState {
    pub fn new(store: Arc<NewsStore>, city: Arc<CityCell>) -> Self {
        Self { store, city }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/news", get(news))
        .route("/important", get(important))
        .route("/city", get(get_city).post(update_city))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "msg": "newswatch API running",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(serde::Serialize)]
struct NewsResp {
    news: Vec<ClassifiedItem>,
}

async fn news(State(state): State<AppState>) -> Json<NewsResp> {
    let snap = state.store.snapshot();
    Json(NewsResp {
        news: snap.news.clone(),
    })
}

#[derive(serde::Serialize)]
struct ImportantResp {
    important: Vec<ClassifiedItem>,
}

async fn important(State(state): State<AppState>) -> Json<ImportantResp> {
    let snap = state.store.snapshot();
    Json(ImportantResp {
        important: snap.important.clone(),
    })
}

async fn get_city(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "city": state.city.get() }))
}

#[derive(Deserialize)]
struct CityUpdate {
    city: Option<String>,
}

/// The poller picks the new value up on its next cycle.
async fn update_city(
    State(state): State<AppState>,
    Json(body): Json<CityUpdate>,
) -> impl IntoResponse {
    match body.city.as_deref() {
        Some(city) if !city.trim().is_empty() => {
            let stored = state.city.set(city);
            tracing::info!(city = %stored, "city updated via api");
            (
                StatusCode::OK,
                Json(json!({ "status": "success", "city": stored })),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": "error", "message": "City not provided" })),
        ),
    }
}
