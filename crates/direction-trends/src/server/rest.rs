//! HTTP router: REST endpoints for dashboard views plus JSON-RPC at `/mcp`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::transport::{JsonRpcRequest, dispatch};
use crate::aggregate::clamp_top_n;
use crate::dashboard::Dashboard;
use crate::error::{DataUnavailable, SourceError, ToolError};
use crate::formatters;
use crate::models::resolve_range;
use crate::tools::{McpTool, ToolContext};

/// Shared state for HTTP handlers.
pub struct HttpState {
    pub tools: Vec<Box<dyn McpTool>>,
    pub ctx: ToolContext,
}

impl HttpState {
    fn dashboard(&self) -> &Dashboard {
        &self.ctx.dashboard
    }
}

/// `?top_n=`
#[derive(Debug, Default, Deserialize)]
pub struct TopNQuery {
    top_n: Option<i64>,
}

/// `?start=&end=`
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    start: Option<i32>,
    end: Option<i32>,
}

/// `?log=&start=&end=`
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapQuery {
    log: Option<bool>,
    start: Option<i32>,
    end: Option<i32>,
}

/// Create the HTTP router.
pub fn create_router(tools: Vec<Box<dyn McpTool>>, ctx: ToolContext) -> Router {
    let state = Arc::new(HttpState { tools, ctx });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/api/directions", get(list_directions))
        .route("/api/direction/{name}", get(direction_series))
        .route("/api/rankings/latest", get(latest_rankings))
        .route("/api/rankings/{year}", get(rankings_for_year))
        .route("/api/heatmap", get(heatmap))
        .route("/api/all-directions", get(all_directions))
        .route("/api/board", get(board))
        .route("/api/board/{year}", post(select_board_year))
        .route("/api/refresh", post(refresh))
        .route("/mcp", post(handle_mcp_post))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// HTTP status for a tool error.
#[must_use]
pub const fn status_for(error: &ToolError) -> StatusCode {
    match error {
        ToolError::Validation { .. } | ToolError::Serialization(_) => StatusCode::BAD_REQUEST,
        ToolError::Data(DataUnavailable { source: SourceError::NotFound { .. }, .. })
        | ToolError::Source(SourceError::NotFound { .. }) => StatusCode::NOT_FOUND,
        ToolError::Data(_) | ToolError::Source(_) => StatusCode::BAD_GATEWAY,
        ToolError::Superseded(_) => StatusCode::CONFLICT,
        ToolError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ToolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ToolError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_user_message() }))).into_response()
    }
}

async fn health_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let dashboard = state.dashboard();
    Json(json!({
        "status": "ok",
        "service": "direction-trends",
        "version": env!("CARGO_PKG_VERSION"),
        "source": dashboard.loader().source().name(),
        "directions": dashboard.directions().len(),
        "tools": state.tools.len(),
        "updated_at": dashboard.updated_at().await,
    }))
}

async fn list_directions(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(json!(state.dashboard().directions()))
}

async fn direction_series(
    State(state): State<Arc<HttpState>>,
    Path(name): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<serde_json::Value>, ToolError> {
    let dashboard = state.dashboard();
    let direction = dashboard.resolve_direction(&name);
    let range = resolve_range(query.start, query.end, dashboard.year_range())?;
    let series = dashboard.trend(&direction, range).await?;
    Ok(Json(formatters::series_json(&direction, &series)))
}

async fn rankings_for_year(
    State(state): State<Arc<HttpState>>,
    Path(year): Path<i32>,
    Query(query): Query<TopNQuery>,
) -> impl IntoResponse {
    let dashboard = state.dashboard();
    let n = query.top_n.map_or(dashboard.default_top_n(), clamp_top_n);
    let view = dashboard.rankings(Some(year), n).await;
    Json(formatters::ranking_rows_json(view.year, &view.entries))
}

async fn latest_rankings(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<TopNQuery>,
) -> impl IntoResponse {
    let dashboard = state.dashboard();
    let n = query.top_n.map_or(dashboard.default_top_n(), clamp_top_n);
    let view = dashboard.rankings(None, n).await;

    let mut body = formatters::ranking_json(&view);
    body["latest_year"] = json!(view.year);
    body["items"] = formatters::ranking_rows_json(view.year, &view.entries);
    Json(body)
}

async fn heatmap(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<serde_json::Value>, ToolError> {
    let dashboard = state.dashboard();
    let range = resolve_range(query.start, query.end, dashboard.year_range())?;
    let view = dashboard.heatmap(None, range, query.log.unwrap_or(true)).await;
    Ok(Json(formatters::heatmap_json(&view)))
}

async fn all_directions(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<serde_json::Value>, ToolError> {
    let dashboard = state.dashboard();
    let range = resolve_range(query.start, query.end, dashboard.year_range())?;
    let outcome = dashboard.get_series_map(dashboard.directions(), range).await;
    Ok(Json(formatters::trends_json(dashboard.directions(), &outcome)))
}

async fn board(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(json!({ "board": state.dashboard().board().await }))
}

async fn select_board_year(
    State(state): State<Arc<HttpState>>,
    Path(year): Path<i32>,
    Query(query): Query<TopNQuery>,
) -> Result<Json<serde_json::Value>, ToolError> {
    let dashboard = state.dashboard();
    let n = query.top_n.map_or(dashboard.default_top_n(), clamp_top_n);
    let selected = dashboard.select_year(year, n).await?;
    Ok(Json(json!({ "board": selected })))
}

async fn refresh(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(state.dashboard().refresh().await)
}

/// JSON-RPC over HTTP.
async fn handle_mcp_post(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<JsonRpcRequest>,
) -> Response {
    tracing::debug!(method = %req.method, "Handling MCP POST request");

    match dispatch(&req, &state.tools, &state.ctx).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
