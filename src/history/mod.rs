//! Rolling in-memory history of probe results, kept by callers.
//!
//! The probe core never reads or writes this. Callers such as the watch loop
//! append an entry after every result and render the stats.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::http_probe::result::ProbeResult;

/// Entries kept per URL before the oldest is dropped.
pub const MAX_ENTRIES_PER_URL: usize = 20;

/// Distinct searches remembered by [`RecentSearches`].
pub const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Local wall-clock time for display, e.g. `3:04:05 PM`
    pub time: String,
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    #[serde(rename = "status")]
    pub http_status: u16,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_result(result: &ProbeResult) -> Self {
        Self {
            time: display_time(&result.timestamp.with_timezone(&Local)),
            response_time_ms: result.response_time_ms,
            http_status: result.http_status,
            timestamp: result.timestamp,
        }
    }

    /// Status 0 means no response at all, 5xx a failing server.
    pub fn is_down(&self) -> bool {
        self.http_status == 0 || self.http_status >= 500
    }
}

/// 12-hour clock without a leading zero on the hour.
pub fn display_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%-I:%M:%S %p").to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_checks: usize,
    pub up_count: usize,
    pub down_count: usize,
    /// Rounded mean in milliseconds, 0 without any checks
    pub avg_response_time: u64,
}

/// Stats over the history of one URL.
///
/// Uptime counts the same checks as up as [`HistoryEntry::is_down`] does, so
/// a probe that got no response (status 0) lowers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub checks: usize,
    pub avg_response_time: u64,
    pub min_response_time: u64,
    pub max_response_time: u64,
    /// Rounded share of checks that were up, 0 to 100
    pub uptime_percentage: u8,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: HashMap<String, VecDeque<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, url: &str, result: &ProbeResult) {
        let entries = self.entries.entry(url.to_string()).or_default();
        entries.push_back(HistoryEntry::from_result(result));
        while entries.len() > MAX_ENTRIES_PER_URL {
            entries.pop_front();
        }
    }

    /// Entries for `url`, oldest first.
    pub fn entries(&self, url: &str) -> Vec<&HistoryEntry> {
        self.entries
            .get(url)
            .map(|entries| entries.iter().collect())
            .unwrap_or_default()
    }

    pub fn latest(&self, url: &str) -> Option<&HistoryEntry> {
        self.entries.get(url).and_then(|entries| entries.back())
    }

    /// `None` until `url` has been recorded at least once.
    pub fn site_stats(&self, url: &str) -> Option<SiteStats> {
        let entries = self.entries.get(url).filter(|entries| !entries.is_empty())?;
        let checks = entries.len();

        let times = entries.iter().map(|e| e.response_time_ms);
        let total = times.clone().fold(0u64, u64::saturating_add);
        let up = entries.iter().filter(|e| !e.is_down()).count();

        Some(SiteStats {
            checks,
            avg_response_time: (total as f64 / checks as f64).round() as u64,
            min_response_time: times.clone().min().unwrap_or_default(),
            max_response_time: times.max().unwrap_or_default(),
            uptime_percentage: (up as f64 * 100.0 / checks as f64).round() as u8,
        })
    }

    pub fn stats(&self) -> HistoryStats {
        let mut stats = HistoryStats::default();
        let mut total_response_time: u64 = 0;

        for entry in self.entries.values().flatten() {
            stats.total_checks += 1;
            if entry.is_down() {
                stats.down_count += 1;
            } else {
                stats.up_count += 1;
            }
            total_response_time = total_response_time.saturating_add(entry.response_time_ms);
        }

        if stats.total_checks > 0 {
            let total = stats.total_checks as f64;
            stats.avg_response_time = (total_response_time as f64 / total).round() as u64;
        }
        stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Most recent distinct searches, newest first.
#[derive(Debug, Clone, Default)]
pub struct RecentSearches {
    urls: VecDeque<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `url` to the front, dropping an older copy and anything past the limit.
    pub fn push(&mut self, url: &str) {
        self.urls.retain(|seen| seen != url);
        self.urls.push_front(url.to_string());
        self.urls.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }
}
