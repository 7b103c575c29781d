use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use thiserror::Error;

use super::report;
use super::result::ProbeResult;

/// Why a single GET or HEAD attempt produced no response.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Failure classes reported as `statusText` when no response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    NetworkError,
    ConnectionError,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Timeout",
            FailureKind::NetworkError => "Network Error",
            FailureKind::ConnectionError => "Connection Error",
        }
    }
}

impl AttemptError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            AttemptError::Timeout(_) => FailureKind::Timeout,
            AttemptError::Transport(e) if e.is_timeout() => FailureKind::Timeout,
            // the request never left the client
            AttemptError::Transport(e) if e.is_builder() => FailureKind::ConnectionError,
            // DNS, refused, reset, redirect limits, broken bodies
            AttemptError::Transport(_) => FailureKind::NetworkError,
        }
    }
}

/// Turn the outcome of a probe into its verdict.
///
/// A response means the host is reachable: only 5xx counts as down.
/// No response at all is always down, with status 0.
pub fn classify(
    url: String,
    outcome: Result<StatusCode, AttemptError>,
    elapsed: Duration,
) -> ProbeResult {
    let response_time_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(status) => ProbeResult {
            url,
            http_status: status.as_u16(),
            status_text: status
                .canonical_reason()
                .filter(|reason| !reason.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
            is_down: status.as_u16() >= 500,
            response_time_ms,
            timestamp: Utc::now(),
            error: None,
            verified: true,
        },
        Err(err) => ProbeResult {
            url,
            http_status: 0,
            status_text: err.failure_kind().as_str().to_string(),
            is_down: true,
            response_time_ms,
            timestamp: Utc::now(),
            error: Some(report(&err)),
            verified: true,
        },
    }
}
