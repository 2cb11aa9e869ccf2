use reqwest;
use serde::Deserialize;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::{AppError, Config};

/// One record of the mirror status document. Never mutated after
/// fetching; the pipeline only filters and reorders.
#[derive(Deserialize, Debug, Clone)]
pub struct MirrorData {
    pub url: String,
    pub protocol: String,
    pub country: String,
    pub country_code: String,
    pub ipv4: bool,
    pub ipv6: bool,
    pub active: bool,
    pub last_sync: Option<String>,
    pub completion_pct: Option<f64>,
    pub delay: Option<u64>,
    pub duration_avg: Option<f64>,
    pub duration_stddev: Option<f64>,
    pub score: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct MirrorsData {
    urls: Vec<MirrorData>,
}

/// Single GET to the status endpoint; network or decode failures are
/// fatal, there is no retry.
pub fn fetch_mirrors(config: &Config) -> Result<Vec<MirrorData>, AppError> {
    let mirrors_data = Runtime::new()?.block_on(async {
        Ok::<_, AppError>(
            reqwest::Client::new()
                .get(config.endpoint.clone())
                .timeout(Duration::from_millis(config.fetch_mirrors_timeout))
                .send()
                .await?
                .json::<MirrorsData>()
                .await?,
        )
    })?;

    Ok(mirrors_data.urls)
}
