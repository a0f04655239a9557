use thiserror::Error;

/// Configuration problems are fatal and reported before any network activity.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid repository '{0}', expected owner/name")]
    InvalidRepo(String),
    #[error("unsupported period unit in '{0}', only days are supported (e.g. 30d)")]
    PeriodUnit(String),
    #[error("invalid period quantity in '{0}', expected a non-negative number of days")]
    PeriodQuantity(String),
}

/// A single page fetch failed. Non-fatal: the walker logs it, treats the
/// page as empty and ends that endpoint's walk.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API rate limit exhausted")]
    RateLimited,
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unreadable response body: {0}")]
    Decode(#[from] serde_json::Error),
}
