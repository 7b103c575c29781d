use std::time::{Duration, Instant};

use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, HeaderMap, HeaderValue,
    PRAGMA, UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{Client, Method, StatusCode, redirect};
use tokio::time::timeout_at;

use super::classify::{AttemptError, classify};
use super::fallback::{Step, first_ok};
use super::result::ProbeResult;
use crate::normalize::NormalizedUrl;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 10;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Issues one bounded GET (with a HEAD fallback) per probe.
///
/// Cloning is cheap and every clone shares the same client. The client
/// keeps no idle connections, so each probe dials its own.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .pool_max_idle_per_host(0)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe `url` once and classify the outcome. Never fails: every
    /// transport problem ends up in the returned result.
    pub async fn probe(&self, url: &NormalizedUrl) -> ProbeResult {
        self.probe_url(url.as_str()).await
    }

    /// Same as [`Prober::probe`] for a URL the caller has already vetted,
    /// such as a target from trusted configuration.
    pub async fn probe_url(&self, url: &str) -> ProbeResult {
        let start = Instant::now();
        // GET and HEAD share a single deadline
        let deadline = tokio::time::Instant::from_std(start) + self.timeout;

        let outcome = first_ok(
            self.attempt(Method::GET, url, browser_headers(), deadline),
            || self.attempt(Method::HEAD, url, minimal_headers(), deadline),
        )
        .await;
        let elapsed = start.elapsed();

        let outcome = match outcome {
            Ok((status, step)) => {
                if step == Step::Fallback {
                    log::debug!("GET {url} failed, HEAD answered with {status}");
                }
                log::info!("{url} answered {status} in {}ms", elapsed.as_millis());
                Ok(status)
            }
            Err(err) => {
                log::warn!("{url} unreachable after {}ms: {err}", elapsed.as_millis());
                Err(err)
            }
        };

        classify(url.to_string(), outcome, elapsed)
    }

    async fn attempt(
        &self,
        method: Method,
        url: &str,
        headers: HeaderMap,
        deadline: tokio::time::Instant,
    ) -> Result<StatusCode, AttemptError> {
        let request = self
            .client
            .request(method, url)
            .headers(headers)
            .send();

        // Only the status line matters, the body is never read
        match timeout_at(deadline, request).await {
            Ok(Ok(response)) => Ok(response.status()),
            Ok(Err(e)) => Err(AttemptError::Transport(e)),
            Err(_) => Err(AttemptError::Timeout(self.timeout)),
        }
    }
}

fn no_cache(headers: &mut HeaderMap) {
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    no_cache(&mut headers);
    headers
}

fn minimal_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    no_cache(&mut headers);
    headers
}
