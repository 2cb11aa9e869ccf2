use crate::options::ParsedOptions;
use crate::sort::SortKey;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;
use url::Url;

pub const DEFAULT_STATUS_ENDPOINT: &str = "https://archlinux.org/mirrors/status/json/";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid lastsync date: {0}")]
    InvalidDate(String),

    #[error("unknown sortby key: {0}")]
    UnknownSortKey(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("File {0} already exists.")]
    FileExists(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Options resolved into the shape the pipeline consumes: filter lists
/// normalized for case-insensitive membership tests, sort keys parsed,
/// the lastsync threshold defaulted to the Unix epoch.
#[derive(Debug)]
pub struct Config {
    pub endpoint: Url,
    pub fetch_mirrors_timeout: u64,
    pub countries: Vec<String>,
    pub protocols: Vec<String>,
    pub country_codes: Vec<String>,
    pub ipv4: bool,
    pub ipv6: bool,
    pub last_sync_after: DateTime<Utc>,
    pub active: bool,
    pub sorts: Vec<SortKey>,
    pub output: Option<String>,
}

impl Config {
    pub fn from_options(options: &ParsedOptions) -> Result<Config, AppError> {
        Config::with_endpoint(options, DEFAULT_STATUS_ENDPOINT)
    }

    /// Same as `from_options` but against a caller-supplied status
    /// endpoint, so the fetcher can be pointed at a local fixture.
    pub fn with_endpoint(options: &ParsedOptions, endpoint: &str) -> Result<Config, AppError> {
        let last_sync_after = match options.single("lastsync") {
            Some(raw) => parse_sync_threshold(raw)?,
            None => DateTime::UNIX_EPOCH,
        };

        let sorts = options
            .multiple("sorts")
            .iter()
            .map(|key| key.parse())
            .collect::<Result<Vec<SortKey>, AppError>>()?;

        let fetch_mirrors_timeout = match options.single("timeout") {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::InvalidTimeout(raw.to_string()))?,
            None => DEFAULT_FETCH_TIMEOUT_MS,
        };

        Ok(Config {
            endpoint: Url::parse(endpoint)?,
            fetch_mirrors_timeout,
            countries: normalize(options.multiple("countries")),
            protocols: normalize(options.multiple("protocols")),
            country_codes: normalize(options.multiple("countrycodes")),
            ipv4: options.flag("ipv4"),
            ipv6: options.flag("ipv6"),
            last_sync_after,
            active: options.flag("active"),
            sorts,
            output: options.single("output").map(str::to_string),
        })
    }
}

fn normalize(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .collect()
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date
/// (midnight UTC).
fn parse_sync_threshold(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(AppError::InvalidDate(raw.to_string()))
}
