use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::{Item, ItemId, ItemPatch, NewItem, OwnerId},
    error::{ApiError, ErrorCode},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::ApiContext;
use app_state::AppState;
use config::load_settings;

type HttpResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListItemsQuery {
    owner_id: Option<i64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    let api = ApiContext::default();
    let seeded = api.seed(settings.seed).await;
    if !seeded.is_empty() {
        info!(count = seeded.len(), "seeded items");
    }

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/items", get(http_list_items).post(http_create_item))
        .route(
            "/items/:item_id",
            axum::routing::patch(http_update_item).delete(http_delete_item),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_items(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListItemsQuery>,
) -> Json<Vec<Item>> {
    Json(api::list_items(&state.api, q.owner_id.map(OwnerId)).await)
}

async fn http_create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewItem>,
) -> HttpResult<(StatusCode, Json<Item>)> {
    let item = api::create_item(&state.api, req)
        .await
        .map_err(into_http_error)?;
    debug!(item_id = %item.id, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn http_delete_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
) -> HttpResult<StatusCode> {
    api::delete_item(&state.api, ItemId(item_id))
        .await
        .map_err(into_http_error)?;
    debug!(item_id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

async fn http_update_item(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<i64>,
    Json(patch): Json<ItemPatch>,
) -> HttpResult<Json<Item>> {
    let item = api::update_item(&state.api, ItemId(item_id), patch)
        .await
        .map_err(into_http_error)?;
    debug!(item_id, "updated item");
    Ok(Json(item))
}

fn into_http_error(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
