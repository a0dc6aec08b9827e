use std::str::FromStr;
use std::time::Duration;

use smart_default::SmartDefault;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, SmartDefault)]
pub struct HnConfig {
    #[default(_code = "DEFAULT_BASE_URL.to_string()")]
    pub base_url: String,
    #[default(30)]
    pub items_per_page: usize,
    #[default(10)]
    pub worker_count: usize,
    /// How many submitted ids are batch-fetched at a time when filtering a
    /// user's history.
    #[default(60)]
    pub submission_chunk_size: usize,
}

#[derive(Debug, Clone, SmartDefault)]
pub struct CacheConfig {
    #[default(_code = "Duration::from_secs(120)")]
    pub idlist_ttl: Duration,
    #[default(_code = "Duration::from_secs(240)")]
    pub item_ttl: Duration,
    #[default(_code = "Duration::from_secs(90)")]
    pub refresh_interval: Duration,
}

impl CacheConfig {
    /// Items and users live twice as long as rankings, which churn faster.
    pub fn from_base_ttl(ttl: Duration, refresh_interval: Duration) -> Self {
        Self {
            idlist_ttl: ttl,
            item_ttl: ttl * 2,
            refresh_interval,
        }
    }
}

#[derive(Debug, Clone, SmartDefault)]
pub struct Config {
    pub hn: HnConfig,
    pub cache: CacheConfig,
    #[default(_code = "Duration::from_secs(10)")]
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from defaults, overridden by whatever `lookup` yields.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(base_url) = lookup("HN_BASE_URL") {
            let base_url = base_url.trim().trim_end_matches('/');
            if base_url.is_empty() {
                return Err(ConfigError::Empty("HN_BASE_URL"));
            }
            config.hn.base_url = base_url.to_string();
        }

        if let Some(n) = positive(&lookup, "HN_ITEMS_PER_PAGE")? {
            config.hn.items_per_page = n;
        }
        if let Some(n) = positive(&lookup, "HN_WORKER_COUNT")? {
            config.hn.worker_count = n;
        }
        if let Some(n) = positive(&lookup, "HN_SUBMISSION_CHUNK_SIZE")? {
            config.hn.submission_chunk_size = n;
        }

        let ttl = positive::<u64>(&lookup, "HN_CACHE_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(config.cache.idlist_ttl);
        let refresh_interval = positive::<u64>(&lookup, "HN_REFRESH_INTERVAL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(config.cache.refresh_interval);
        config.cache = CacheConfig::from_base_ttl(ttl, refresh_interval);

        if let Some(secs) = positive::<u64>(&lookup, "HN_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn positive<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(n) if n > T::default() => Ok(Some(n)),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}
