use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::mirrors::MirrorData;

/// Applies every active filter in sequence. Each predicate passes
/// everything when its option was not supplied, so the result is the
/// conjunction of whatever the user asked for.
pub fn filter_mirrors(mirrors: Vec<MirrorData>, config: &Config) -> Vec<MirrorData> {
    mirrors
        .into_iter()
        .filter(|mirror| member_of(&config.countries, &mirror.country))
        .filter(|mirror| member_of(&config.protocols, &mirror.protocol))
        .filter(|mirror| member_of(&config.country_codes, &mirror.country_code))
        .filter(|mirror| !config.ipv4 || mirror.ipv4)
        .filter(|mirror| !config.ipv6 || mirror.ipv6)
        .filter(|mirror| synced_after(mirror.last_sync.as_deref(), &config.last_sync_after))
        .filter(|mirror| !config.active || mirror.active)
        .collect()
}

/// Case-insensitive trimmed membership; an empty requested list means
/// the filter is off.
fn member_of(requested: &[String], value: &str) -> bool {
    requested.is_empty() || requested.contains(&value.trim().to_lowercase())
}

/// A record passes only with a parseable sync timestamp strictly later
/// than the threshold. With no lastsync option the threshold is the
/// epoch, so records without a valid timestamp are still dropped.
fn synced_after(last_sync: Option<&str>, threshold: &DateTime<Utc>) -> bool {
    last_sync
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|ts| ts.with_timezone(&Utc) > *threshold)
        .unwrap_or(false)
}
