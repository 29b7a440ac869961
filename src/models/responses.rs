//! Response DTOs for the HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::repository::WarmSummary;

/// Response body for recording a click (GET /api/v1/counter/:id)
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    pub banner_id: i64,
    /// Total clicks of the banner after recording this one
    pub click_count: u64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Response body for period statistics (POST /api/v1/stats/:id)
#[derive(Debug, Clone, Serialize)]
pub struct PeriodStatsResponse {
    pub banner_id: i64,
    pub total_clicks: u64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub clicks_in_period: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_click: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_click: Option<DateTime<Utc>>,
}

/// Response body for the cache stats endpoint (GET /api/v1/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses)), 0.0 before any request
    pub hit_rate: f64,
}

impl CacheStatsResponse {
    pub fn new(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Generic success body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub status: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: "success".to_string(),
        }
    }
}

/// Response body for cache warming (POST /api/v1/cache/warm)
#[derive(Debug, Clone, Serialize)]
pub struct WarmResponse {
    pub message: String,
    pub status: String,
    pub banners: usize,
    pub click_stats: usize,
    pub top_banners: bool,
}

impl From<WarmSummary> for WarmResponse {
    fn from(summary: WarmSummary) -> Self {
        Self {
            message: "Cache warmed successfully".to_string(),
            status: "success".to_string(),
            banners: summary.banners,
            click_stats: summary.click_stats,
            top_banners: summary.top_banners,
        }
    }
}

/// Response body for manual invalidation (POST /api/v1/cache/banner/:id/invalidate)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub message: String,
    pub banner_id: i64,
    pub status: String,
}

impl InvalidateResponse {
    pub fn new(banner_id: i64) -> Self {
        Self {
            message: "Banner cache invalidated successfully".to_string(),
            banner_id,
            status: "success".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_stats_response_hit_rate() {
        let resp = CacheStatsResponse::new(CacheStats {
            hits: 80,
            misses: 20,
            ..CacheStats::default()
        });
        assert!((resp.hit_rate - 0.8).abs() < 0.001);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["stats"]["hits"], 80);
    }

    #[test]
    fn test_cache_stats_response_zero_requests() {
        let resp = CacheStatsResponse::new(CacheStats::default());
        assert_eq!(resp.hit_rate, 0.0);
    }

    #[test]
    fn test_warm_response_from_summary() {
        let resp = WarmResponse::from(WarmSummary {
            banners: 3,
            click_stats: 2,
            top_banners: true,
        });
        assert_eq!(resp.banners, 3);
        assert_eq!(resp.status, "success");
    }

    #[test]
    fn test_period_stats_skips_missing_clicks() {
        let now = Utc::now();
        let resp = PeriodStatsResponse {
            banner_id: 1,
            total_clicks: 0,
            period_start: now,
            period_end: now,
            clicks_in_period: 0,
            first_click: None,
            last_click: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("first_click"));
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
