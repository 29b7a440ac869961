//! API Handlers
//!
//! HTTP request handlers for the banner, click and cache endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::{RepositoryError, Result};
use crate::models::{
    Banner, BannerClickCount, BannerRequest, BannerWithStats, CacheStatsResponse, Click,
    ClickStats, CounterResponse, HealthResponse, InvalidateResponse, MessageResponse, NewClick,
    PeriodStatsRequest, PeriodStatsResponse, SearchQuery, TopBannersQuery, WarmResponse,
};
use crate::repository::{BannerRepository, CachedBannerRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-fronted repository
    pub repo: Arc<CachedBannerRepository>,
}

impl AppState {
    pub fn new(repo: CachedBannerRepository) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }
}

// == Counter & Period Stats ==
/// Handler for GET /api/v1/counter/:id
///
/// Records one click for the banner and returns its updated total.
pub async fn counter_handler(
    State(state): State<AppState>,
    Path(banner_id): Path<i64>,
) -> Result<Json<CounterResponse>> {
    let click = state.repo.create_click(NewClick::now(banner_id)).await?;
    let stats = state.repo.get_click_stats(banner_id).await?;

    Ok(Json(CounterResponse {
        banner_id,
        click_count: stats.total_clicks,
        timestamp: click.timestamp,
        message: "Click recorded".to_string(),
    }))
}

/// Handler for POST /api/v1/stats/:id
///
/// Counts the banner's clicks within `[ts_from, ts_to]`.
pub async fn period_stats_handler(
    State(state): State<AppState>,
    Path(banner_id): Path<i64>,
    Json(req): Json<PeriodStatsRequest>,
) -> Result<Json<PeriodStatsResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(RepositoryError::InvalidRequest(error_msg));
    }

    state.repo.get_banner(banner_id).await?;
    let stats = state.repo.get_click_stats(banner_id).await?;
    let clicks = state
        .repo
        .get_clicks_by_banner_and_date_range(banner_id, req.ts_from, req.ts_to)
        .await?;

    Ok(Json(PeriodStatsResponse {
        banner_id,
        total_clicks: stats.total_clicks,
        period_start: req.ts_from,
        period_end: req.ts_to,
        clicks_in_period: clicks.len(),
        first_click: clicks.iter().map(|c| c.timestamp).min(),
        last_click: clicks.iter().map(|c| c.timestamp).max(),
    }))
}

// == Banners ==
/// Handler for GET /api/v1/banners
pub async fn list_banners_handler(State(state): State<AppState>) -> Result<Json<Vec<Banner>>> {
    Ok(Json(state.repo.get_all_banners().await?))
}

/// Handler for POST /api/v1/banners
pub async fn create_banner_handler(
    State(state): State<AppState>,
    Json(req): Json<BannerRequest>,
) -> Result<(StatusCode, Json<Banner>)> {
    if let Some(error_msg) = req.validate() {
        return Err(RepositoryError::InvalidRequest(error_msg));
    }

    let banner = state.repo.create_banner(req.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Handler for GET /api/v1/banners/search?q=
pub async fn search_banners_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Banner>>> {
    Ok(Json(state.repo.search_banners(&query.q).await?))
}

/// Handler for GET /api/v1/banners/top?limit=
pub async fn top_banners_handler(
    State(state): State<AppState>,
    Query(query): Query<TopBannersQuery>,
) -> Result<Json<Vec<BannerClickCount>>> {
    let limit = query.limit().map_err(RepositoryError::InvalidRequest)?;
    Ok(Json(state.repo.get_top_banners(limit).await?))
}

/// Handler for GET /api/v1/banners/:id
pub async fn get_banner_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Banner>> {
    Ok(Json(state.repo.get_banner(id).await?))
}

/// Handler for PUT /api/v1/banners/:id
pub async fn update_banner_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<BannerRequest>,
) -> Result<Json<Banner>> {
    if let Some(error_msg) = req.validate() {
        return Err(RepositoryError::InvalidRequest(error_msg));
    }

    let mut banner = state.repo.get_banner(id).await?;
    banner.name = req.name.trim().to_string();

    Ok(Json(state.repo.update_banner(&banner).await?))
}

/// Handler for DELETE /api/v1/banners/:id
pub async fn delete_banner_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.repo.delete_banner(id).await?;
    Ok(Json(MessageResponse::success(format!("Banner {} deleted", id))))
}

/// Handler for GET /api/v1/banners/:id/stats
pub async fn banner_stats_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClickStats>> {
    // Unknown banners have zero stats in the store; surface them as 404 here.
    state.repo.get_banner(id).await?;
    Ok(Json(state.repo.get_click_stats(id).await?))
}

/// Handler for GET /api/v1/banners/:id/summary
pub async fn banner_summary_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BannerWithStats>> {
    Ok(Json(state.repo.get_banner_with_stats(id).await?))
}

// == Clicks ==
/// Handler for POST /api/v1/clicks
pub async fn create_click_handler(
    State(state): State<AppState>,
    Json(click): Json<NewClick>,
) -> Result<(StatusCode, Json<Click>)> {
    let click = state.repo.create_click(click).await?;
    Ok((StatusCode::CREATED, Json(click)))
}

/// Handler for GET /api/v1/clicks/:id
pub async fn get_click_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Click>> {
    Ok(Json(state.repo.get_click(id).await?))
}

/// Handler for DELETE /api/v1/clicks/:id
pub async fn delete_click_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    state.repo.delete_click(id).await?;
    Ok(Json(MessageResponse::success(format!("Click {} deleted", id))))
}

// == Cache Management ==
/// Handler for GET /api/v1/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.repo.cache_stats().await))
}

/// Handler for POST /api/v1/cache/clear
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.repo.clear_cache().await;
    Json(MessageResponse::success("Cache cleared successfully"))
}

/// Handler for POST /api/v1/cache/warm
pub async fn warm_cache_handler(State(state): State<AppState>) -> Result<Json<WarmResponse>> {
    let summary = state.repo.warm_cache().await?;
    Ok(Json(WarmResponse::from(summary)))
}

/// Handler for POST /api/v1/cache/banner/:id/invalidate
pub async fn invalidate_banner_cache_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<InvalidateResponse> {
    state.repo.invalidate_banner_cache(id).await;
    Json(InvalidateResponse::new(id))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
