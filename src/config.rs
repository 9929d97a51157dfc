use std::env;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::{AppError, Result};

const AD_LIBRARY_BASE: &str = "https://www.facebook.com/ads/library/";

/// Query parameters identifying an ad-library search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdLibrarySearch {
    pub active_status: String,
    pub ad_type: String,
    pub country: String,
    pub query: String,
    pub search_type: String,
}

impl Default for AdLibrarySearch {
    fn default() -> Self {
        Self {
            active_status: "active".to_string(),
            ad_type: "all".to_string(),
            country: "BR".to_string(),
            query: "calvo".to_string(),
            search_type: "keyword_unordered".to_string(),
        }
    }
}

impl AdLibrarySearch {
    /// The public search page URL handed to the scraper.
    pub fn to_url(&self) -> Result<Url> {
        Url::parse_with_params(
            AD_LIBRARY_BASE,
            &[
                ("active_status", self.active_status.as_str()),
                ("ad_type", self.ad_type.as_str()),
                ("country", self.country.as_str()),
                ("q", self.query.as_str()),
                ("search_type", self.search_type.as_str()),
            ],
        )
        .map_err(|e| AppError::ConfigError(format!("Invalid ad library URL: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scraper_url: String,
    pub backend_url: String,
    pub search: AdLibrarySearch,
    pub scrape_timeout: Duration,
    pub forward_timeout: Duration,
    pub verify_timeout: Duration,
    pub verify_limit: u32,
    pub verify_keyword: Option<String>,
    pub pause_on_exit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper_url: "http://localhost:5000".to_string(),
            backend_url: "http://localhost:3001".to_string(),
            search: AdLibrarySearch::default(),
            scrape_timeout: Duration::from_secs(300),
            forward_timeout: Duration::from_secs(60),
            verify_timeout: Duration::from_secs(60),
            verify_limit: 3,
            verify_keyword: None,
            pause_on_exit: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves the configuration from `lookup`, keeping defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let search = AdLibrarySearch {
            active_status: text("AD_LIBRARY_ACTIVE_STATUS", defaults.search.active_status),
            ad_type: text("AD_LIBRARY_AD_TYPE", defaults.search.ad_type),
            country: text("AD_LIBRARY_COUNTRY", defaults.search.country),
            query: text("AD_LIBRARY_QUERY", defaults.search.query),
            search_type: text("AD_LIBRARY_SEARCH_TYPE", defaults.search.search_type),
        };

        let config = Config {
            scraper_url: text("SCRAPER_URL", defaults.scraper_url),
            backend_url: text("BACKEND_URL", defaults.backend_url),
            search,
            scrape_timeout: seconds(&lookup, "SCRAPE_TIMEOUT_SECS", defaults.scrape_timeout)?,
            forward_timeout: seconds(&lookup, "FORWARD_TIMEOUT_SECS", defaults.forward_timeout)?,
            verify_timeout: seconds(&lookup, "VERIFY_TIMEOUT_SECS", defaults.verify_timeout)?,
            verify_limit: parsed(&lookup, "VERIFY_LIMIT", defaults.verify_limit)?,
            verify_keyword: lookup("VERIFY_KEYWORD").filter(|k| !k.trim().is_empty()),
            pause_on_exit: flag(&lookup, "PAUSE_ON_EXIT", defaults.pause_on_exit)?,
        };

        // Fail early rather than on the first request
        config.search.to_url()?;
        Url::parse(&config.scraper_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid SCRAPER_URL: {}", e)))?;
        Url::parse(&config.backend_url)
            .map_err(|e| AppError::ConfigError(format!("Invalid BACKEND_URL: {}", e)))?;

        Ok(config)
    }

    pub fn scrape_endpoint(&self) -> String {
        join(&self.scraper_url, "/scrape")
    }

    pub fn ingest_endpoint(&self) -> String {
        join(&self.backend_url, "/api/scraper/process-ads")
    }

    pub fn verify_endpoint(&self) -> String {
        join(&self.backend_url, "/api/scraper/ads")
    }

    /// Query string for the verify call: the limit, plus the keyword filter when set.
    pub fn verify_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.verify_limit.to_string())];
        if let Some(keyword) = &self.verify_keyword {
            query.push(("keyword", keyword.clone()));
        }
        query
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}

fn seconds<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = parsed(lookup, key, default.as_secs())?;
    if secs == 0 {
        return Err(AppError::ConfigError(format!("{} must be greater than zero", key)));
    }
    Ok(Duration::from_secs(secs))
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(AppError::ConfigError(format!("Invalid {}: {}", key, other))),
        },
    }
}
