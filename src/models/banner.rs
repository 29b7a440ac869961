//! Banner and click domain types
//!
//! Payloads produced by the backing repository and stored verbatim by the cache.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A banner that clicks are recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single recorded impression of a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    pub id: i64,
    pub banner_id: i64,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a click. A missing timestamp means "now".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewClick {
    pub banner_id: i64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewClick {
    pub fn now(banner_id: i64) -> Self {
        Self {
            banner_id,
            timestamp: None,
        }
    }
}

/// Aggregate click statistics for one banner.
///
/// A banner without clicks has `total_clicks == 0` and no timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickStats {
    pub banner_id: i64,
    pub total_clicks: u64,
    pub first_click: Option<DateTime<Utc>>,
    pub last_click: Option<DateTime<Utc>>,
}

/// A banner together with its click count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerWithStats {
    pub banner: Banner,
    pub click_count: u64,
    pub last_click: Option<DateTime<Utc>>,
}

/// One row of the top-banners ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerClickCount {
    pub banner_id: i64,
    pub banner_name: String,
    pub click_count: u64,
}

/// Clicks within one hour of a day (0-23).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyClicks {
    pub hour: u32,
    pub click_count: u64,
}

/// Clicks within one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub click_count: u64,
}
