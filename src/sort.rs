use std::cmp::Ordering;
use std::str::FromStr;

use crate::config::AppError;
use crate::mirrors::MirrorData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CompletionPct,
    Country,
    CountryCode,
    Delay,
    DurationAvg,
    DurationStddev,
    LastSync,
    Score,
}

impl FromStr for SortKey {
    type Err = AppError;
    fn from_str(key: &str) -> Result<Self, Self::Err> {
        match key {
            "completion_pct" => Ok(SortKey::CompletionPct),
            "country" => Ok(SortKey::Country),
            "country_code" => Ok(SortKey::CountryCode),
            "delay" => Ok(SortKey::Delay),
            "duration_avg" => Ok(SortKey::DurationAvg),
            "duration_stddev" => Ok(SortKey::DurationStddev),
            "last_sync" => Ok(SortKey::LastSync),
            "score" => Ok(SortKey::Score),
            _ => Err(AppError::UnknownSortKey(key.to_string())),
        }
    }
}

impl SortKey {
    /// Numeric fields sort by value, string fields by their length,
    /// and missing values coerce to infinity so they end up last.
    fn coerce(&self, mirror: &MirrorData) -> f64 {
        match self {
            SortKey::CompletionPct => mirror.completion_pct.unwrap_or(f64::INFINITY),
            SortKey::Country => mirror.country.len() as f64,
            SortKey::CountryCode => mirror.country_code.len() as f64,
            SortKey::Delay => mirror.delay.map(|d| d as f64).unwrap_or(f64::INFINITY),
            SortKey::DurationAvg => mirror.duration_avg.unwrap_or(f64::INFINITY),
            SortKey::DurationStddev => mirror.duration_stddev.unwrap_or(f64::INFINITY),
            SortKey::LastSync => mirror
                .last_sync
                .as_ref()
                .map(|raw| raw.len() as f64)
                .unwrap_or(f64::INFINITY),
            SortKey::Score => mirror.score.unwrap_or(f64::INFINITY),
        }
    }
}

/// Orders by the sum of per-key coerced deltas, NOT lexicographically:
/// a later key can outweigh an earlier one by sheer magnitude. That is
/// the documented behavior of sortby and is kept as-is. An empty key
/// list compares everything equal, and the sort is stable, so input
/// order is preserved.
pub fn sort_mirrors(mirrors: &mut [MirrorData], sorts: &[SortKey]) {
    mirrors.sort_by(|a, b| {
        let delta: f64 = sorts.iter().map(|key| key.coerce(a) - key.coerce(b)).sum();
        delta.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    });
}
