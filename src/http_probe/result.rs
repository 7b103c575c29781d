use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The classified outcome of one probe.
///
/// Serialized with the field names the web front-end expects:
/// `url`, `status`, `statusText`, `isDown`, `responseTime`, `timestamp`,
/// `error` and `verified`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    /// The URL that was probed (or the rejected input)
    pub url: String,

    /// HTTP status code, 0 when no response was received
    #[serde(rename = "status")]
    pub http_status: u16,

    /// Reason phrase, or the failure class when there was no response
    pub status_text: String,

    /// Only 5xx responses and failed requests count as down
    pub is_down: bool,

    /// Wall-clock time of the probe in milliseconds, measured on every path
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,

    pub timestamp: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// True when the result comes from a real network check
    pub verified: bool,
}

impl ProbeResult {
    /// Result for input that was refused before any request was made.
    pub fn rejected(url: String, status_text: &str, message: &str) -> Self {
        Self {
            url,
            http_status: 0,
            status_text: status_text.to_string(),
            is_down: true,
            response_time_ms: 0,
            timestamp: Utc::now(),
            error: Some(message.to_string()),
            verified: false,
        }
    }
}
