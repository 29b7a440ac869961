//! Configuration Module
//!
//! Handles loading server and cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default TTL for single banners
pub const DEFAULT_BANNER_TTL: Duration = Duration::from_secs(5 * 60);
/// Default TTL for click statistics
pub const DEFAULT_CLICK_STATS_TTL: Duration = Duration::from_secs(2 * 60);
/// Default TTL for banner-with-stats views
pub const DEFAULT_BANNER_STATS_TTL: Duration = Duration::from_secs(3 * 60);
/// Default TTL for top-banner rankings
pub const DEFAULT_TOP_BANNERS_TTL: Duration = Duration::from_secs(60);
/// Default interval of the expired-entry reaper
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(30);
/// Ranking size preloaded by cache warming
pub const DEFAULT_WARM_TOP_LIMIT: usize = 10;

/// Cache tuning: reaper interval and per-kind default TTLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Interval between reaper runs
    pub cleanup_interval: Duration,
    pub banner_ttl: Duration,
    pub click_stats_ttl: Duration,
    pub banner_stats_ttl: Duration,
    pub top_banners_ttl: Duration,
    /// Limit of the top-banners list populated by cache warming
    pub warm_top_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            banner_ttl: DEFAULT_BANNER_TTL,
            click_stats_ttl: DEFAULT_CLICK_STATS_TTL,
            banner_stats_ttl: DEFAULT_BANNER_STATS_TTL,
            top_banners_ttl: DEFAULT_TOP_BANNERS_TTL,
            warm_top_limit: DEFAULT_WARM_TOP_LIMIT,
        }
    }
}

impl CacheConfig {
    /// Returns a copy with a different reaper interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Loads cache settings from the environment; TTLs are in seconds.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL` - Reaper interval (default: 30)
    /// - `CACHE_BANNER_TTL` - Banner TTL (default: 300)
    /// - `CACHE_CLICK_STATS_TTL` - Click stats TTL (default: 120)
    /// - `CACHE_BANNER_STATS_TTL` - Banner-with-stats TTL (default: 180)
    /// - `CACHE_TOP_BANNERS_TTL` - Top banners TTL (default: 60)
    /// - `CACHE_WARM_TOP_LIMIT` - Top banners limit warmed at startup (default: 10)
    pub fn from_env() -> Self {
        Self {
            cleanup_interval: secs_var("CLEANUP_INTERVAL", DEFAULT_CLEANUP_INTERVAL),
            banner_ttl: secs_var("CACHE_BANNER_TTL", DEFAULT_BANNER_TTL),
            click_stats_ttl: secs_var("CACHE_CLICK_STATS_TTL", DEFAULT_CLICK_STATS_TTL),
            banner_stats_ttl: secs_var("CACHE_BANNER_STATS_TTL", DEFAULT_BANNER_STATS_TTL),
            top_banners_ttl: secs_var("CACHE_TOP_BANNERS_TTL", DEFAULT_TOP_BANNERS_TTL),
            warm_top_limit: parse_var("CACHE_WARM_TOP_LIMIT", DEFAULT_WARM_TOP_LIMIT),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Whether to preload the cache before serving
    pub warm_on_startup: bool,
    /// Cache tuning
    pub cache: CacheConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WARM_ON_STARTUP` - Warm the cache before serving (default: false)
    /// - plus everything read by [`CacheConfig::from_env`]
    pub fn from_env() -> Self {
        Self {
            server_port: parse_var("SERVER_PORT", 3000),
            warm_on_startup: parse_var("WARM_ON_STARTUP", false),
            cache: CacheConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            warm_on_startup: false,
            cache: CacheConfig::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn secs_var(name: &str, default: Duration) -> Duration {
    Duration::from_secs(parse_var(name, default.as_secs()))
}
