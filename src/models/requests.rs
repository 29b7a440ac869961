//! Request DTOs for the HTTP API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Maximum banner name length in characters
pub const MAX_BANNER_NAME_LENGTH: usize = 255;

/// Default and maximum size of a top-banners ranking
pub const DEFAULT_TOP_LIMIT: usize = 10;
pub const MAX_TOP_LIMIT: usize = 100;

/// Request body for creating or renaming a banner
#[derive(Debug, Clone, Deserialize)]
pub struct BannerRequest {
    /// Banner display name
    pub name: String,
}

impl BannerRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Banner name cannot be empty".to_string());
        }
        if self.name.chars().count() > MAX_BANNER_NAME_LENGTH {
            return Some(format!(
                "Banner name cannot exceed {} characters",
                MAX_BANNER_NAME_LENGTH
            ));
        }
        None
    }
}

/// Query string for the top-banners ranking (`?limit=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopBannersQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TopBannersQuery {
    /// Effective limit, or an error message when out of range.
    pub fn limit(&self) -> Result<usize, String> {
        match self.limit.unwrap_or(DEFAULT_TOP_LIMIT) {
            0 => Err("Limit must be positive".to_string()),
            n if n > MAX_TOP_LIMIT => Err(format!("Limit cannot exceed {}", MAX_TOP_LIMIT)),
            n => Ok(n),
        }
    }
}

/// Query string for banner search (`?q=`)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Request body for period statistics (`POST /api/v1/stats/:id`)
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodStatsRequest {
    pub ts_from: DateTime<Utc>,
    pub ts_to: DateTime<Utc>,
}

impl PeriodStatsRequest {
    pub fn validate(&self) -> Option<String> {
        if self.ts_from > self.ts_to {
            return Some("ts_from must be before ts_to".to_string());
        }
        None
    }
}
