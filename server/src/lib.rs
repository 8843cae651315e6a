use anyhow::Result;
use axum::{extract::{Query, State}, routing::{get, post}, Json, Router};
use pulse_core::seo::{analyze, SeoInput, SeoReport};
use pulse_core::stats::{recent_activity, ActivityPoint, ChannelTotals};
use pulse_core::trending::{aggregate, RandomGrowth, TrendingEntry, TrendingFilter};
use pulse_core::youtube::{VideoCatalog, YouTubeClient, DEFAULT_REGION, DEFAULT_SEARCH_RESULTS};
use pulse_core::{ChannelSummary, VideoSummary, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;

pub use config::ServerConfig;
use error::{ApiError, CHANNEL_FAILED, SEARCH_FAILED, TRENDING_FAILED, VIDEOS_FAILED};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingParams {
    pub region_code: Option<String>,
    pub category_id: Option<String>,
    /// Display-name filter applied after ranking.
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelParams {
    pub channel_id: Option<String>,
    /// Kept as text so a malformed value falls back to the default page size.
    pub max_results: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub max_results: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelOverview {
    pub channel: ChannelSummary,
    pub totals: ChannelTotals,
    pub recent_activity: Vec<ActivityPoint>,
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn VideoCatalog>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn max_results(raw: &Option<String>, default: u32) -> u32 {
    non_empty(raw).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origins: Vec<_> = allow_origin
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
    }
}

pub fn build_app(config: &ServerConfig) -> Result<Router> {
    let client = YouTubeClient::with_base_url(&config.api_base, config.api_key.clone())?;
    Ok(build_app_with_catalog(Arc::new(client), config.cors_allow_origin.as_deref()))
}

/// Router over any catalog; tests plug in an in-memory one.
pub fn build_app_with_catalog(catalog: Arc<dyn VideoCatalog>, allow_origin: Option<&str>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/trending", get(trending_handler))
        .route("/channel", get(channel_handler))
        .route("/channel/summary", get(channel_summary_handler))
        .route("/videos", get(videos_handler))
        .route("/search", get(search_handler))
        .route("/seo/analyze", post(seo_handler))
        .with_state(AppState { catalog })
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allow_origin))
}

pub async fn trending_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<Vec<TrendingEntry>>, ApiError> {
    let region = non_empty(&params.region_code).unwrap_or(DEFAULT_REGION);
    let videos = state
        .catalog
        .most_popular(region, non_empty(&params.category_id))
        .await
        .map_err(ApiError::upstream(TRENDING_FAILED))?;
    let entries = aggregate(&videos, &mut RandomGrowth::new());
    let filter = TrendingFilter { category: params.category, q: params.q };
    Ok(Json(filter.apply(entries)))
}

pub async fn channel_handler(
    State(state): State<AppState>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<ChannelSummary>, ApiError> {
    let channel_id = non_empty(&params.channel_id).ok_or(ApiError::BadRequest("Channel ID is required"))?;
    let channel = state.catalog.channel(channel_id).await.map_err(ApiError::upstream(CHANNEL_FAILED))?;
    channel.map(Json).ok_or(ApiError::NotFound("Channel not found"))
}

pub async fn videos_handler(
    State(state): State<AppState>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    let channel_id = non_empty(&params.channel_id).ok_or(ApiError::BadRequest("Channel ID is required"))?;
    let videos = state
        .catalog
        .channel_videos(channel_id, max_results(&params.max_results, MAX_PAGE_SIZE))
        .await
        .map_err(ApiError::upstream(VIDEOS_FAILED))?;
    Ok(Json(videos))
}

pub async fn channel_summary_handler(
    State(state): State<AppState>,
    Query(params): Query<ChannelParams>,
) -> Result<Json<ChannelOverview>, ApiError> {
    let channel_id = non_empty(&params.channel_id).ok_or(ApiError::BadRequest("Channel ID is required"))?;
    let channel = state
        .catalog
        .channel(channel_id)
        .await
        .map_err(ApiError::upstream(CHANNEL_FAILED))?
        .ok_or(ApiError::NotFound("Channel not found"))?;
    let videos = state
        .catalog
        .channel_videos(channel_id, MAX_PAGE_SIZE)
        .await
        .map_err(ApiError::upstream(VIDEOS_FAILED))?;
    Ok(Json(ChannelOverview {
        channel,
        totals: ChannelTotals::from_videos(&videos),
        recent_activity: recent_activity(&videos),
    }))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    let query = non_empty(&params.q).ok_or(ApiError::BadRequest("Query is required"))?;
    let videos = state
        .catalog
        .search(query, max_results(&params.max_results, DEFAULT_SEARCH_RESULTS))
        .await
        .map_err(ApiError::upstream(SEARCH_FAILED))?;
    Ok(Json(videos))
}

pub async fn seo_handler(Json(input): Json<SeoInput>) -> Json<SeoReport> {
    Json(analyze(&input))
}
