use chrono::Utc;

use super::classify::FailureKind;
use super::probe::Prober;
use super::result::ProbeResult;

/// Probe every URL concurrently, one task each, and wait for all of them.
///
/// Results come back in the order of `urls`. A task that panics or is
/// cancelled yields a failed result for its own URL only. Accepts
/// [`NormalizedUrl`](crate::normalize::NormalizedUrl)s or vetted strings.
pub async fn probe_all<U>(prober: &Prober, urls: Vec<U>) -> Vec<ProbeResult>
where
    U: AsRef<str>,
{
    let mut handles = Vec::with_capacity(urls.len());

    for url in urls {
        let url = url.as_ref().to_string();
        let prober = prober.clone();
        let target = url.clone();
        let handle = tokio::spawn(async move { prober.probe_url(&target).await });
        handles.push((url, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (url, handle) in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                log::error!("Probe task for {url} failed: {e}");
                results.push(ProbeResult {
                    url,
                    http_status: 0,
                    status_text: FailureKind::ConnectionError.as_str().to_string(),
                    is_down: true,
                    response_time_ms: 0,
                    timestamp: Utc::now(),
                    error: Some(format!("Probe task failed: {e}")),
                    verified: false,
                });
            }
        }
    }

    results
}
