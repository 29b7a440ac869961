//! Domain payloads plus request and response models for the HTTP API
//!
//! The banner types are what the repository produces and the cache stores;
//! the request/response DTOs shape HTTP bodies.

pub mod banner;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use banner::{
    Banner, BannerClickCount, BannerWithStats, Click, ClickStats, DailyClicks, HourlyClicks,
    NewClick,
};
pub use requests::{BannerRequest, PeriodStatsRequest, SearchQuery, TopBannersQuery};
pub use responses::{
    CacheStatsResponse, CounterResponse, ErrorResponse, HealthResponse, InvalidateResponse,
    MessageResponse, PeriodStatsResponse, WarmResponse,
};
