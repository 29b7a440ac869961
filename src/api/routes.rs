//! API Routes
//!
//! Configures the Axum router with all banner service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    banner_stats_handler, banner_summary_handler, cache_stats_handler, clear_cache_handler,
    counter_handler, create_banner_handler, create_click_handler, delete_banner_handler,
    delete_click_handler, get_banner_handler, get_click_handler, health_handler,
    invalidate_banner_cache_handler, list_banners_handler, period_stats_handler,
    search_banners_handler, top_banners_handler, update_banner_handler, warm_cache_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/v1/counter/:id` - Record a click
/// - `POST /api/v1/stats/:id` - Click counts within a period
/// - `GET|POST /api/v1/banners` - List or create banners
/// - `GET /api/v1/banners/search` - Search banners by name
/// - `GET /api/v1/banners/top` - Top banners ranking
/// - `GET|PUT|DELETE /api/v1/banners/:id` - Read, rename or delete a banner
/// - `GET /api/v1/banners/:id/stats` - Click statistics
/// - `GET /api/v1/banners/:id/summary` - Banner with click count
/// - `POST /api/v1/clicks` - Record a click with an optional timestamp
/// - `GET|DELETE /api/v1/clicks/:id` - Read or delete a click
/// - `GET /api/v1/cache/stats`, `POST /api/v1/cache/{clear,warm}`,
///   `POST /api/v1/cache/banner/:id/invalidate` - Cache management
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/counter/:id", get(counter_handler))
        .route("/stats/:id", post(period_stats_handler))
        .route(
            "/banners",
            get(list_banners_handler).post(create_banner_handler),
        )
        .route("/banners/search", get(search_banners_handler))
        .route("/banners/top", get(top_banners_handler))
        .route(
            "/banners/:id",
            get(get_banner_handler)
                .put(update_banner_handler)
                .delete(delete_banner_handler),
        )
        .route("/banners/:id/stats", get(banner_stats_handler))
        .route("/banners/:id/summary", get(banner_summary_handler))
        .route("/clicks", post(create_click_handler))
        .route(
            "/clicks/:id",
            get(get_click_handler).delete(delete_click_handler),
        )
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/clear", post(clear_cache_handler))
        .route("/cache/warm", post(warm_cache_handler))
        .route(
            "/cache/banner/:id/invalidate",
            post(invalidate_banner_cache_handler),
        );

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::cache::InMemoryCache;
    use crate::config::CacheConfig;
    use crate::repository::{CachedBannerRepository, InMemoryBannerRepository};

    fn create_test_app() -> Router {
        let repo = CachedBannerRepository::new(
            Arc::new(InMemoryBannerRepository::new()),
            Arc::new(InMemoryCache::new(CacheConfig::default())),
        );
        create_router(AppState::new(repo))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_stats_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/cache/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_top_route_not_shadowed_by_id() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/banners/top")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_banner_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/banners/404")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
