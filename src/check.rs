//! Caller-facing entry points: validate the input, then probe it.

use crate::error::CheckError;
use crate::http_probe::prelude::*;
use crate::normalize::{NormalizedUrl, validate};

/// Validate `input` and probe it. Input errors are returned before any
/// request is made; network failures are part of the `ProbeResult`.
pub async fn check(prober: &Prober, input: &str) -> Result<ProbeResult, CheckError> {
    let url = validate(input)?;
    Ok(prober.probe(&url).await)
}

/// Check several inputs concurrently. The output lines up with `inputs`.
pub async fn check_all(
    prober: &Prober,
    inputs: &[String],
) -> Vec<Result<ProbeResult, CheckError>> {
    let validated: Vec<_> = inputs.iter().map(|input| validate(input)).collect();
    let urls: Vec<NormalizedUrl> = validated
        .iter()
        .filter_map(|v| v.as_ref().ok().cloned())
        .collect();

    let mut probed = probe_all(prober, urls).await.into_iter();

    let mut results = Vec::with_capacity(validated.len());
    for v in validated {
        match v {
            Err(e) => results.push(Err(e)),
            Ok(_) => {
                if let Some(result) = probed.next() {
                    results.push(Ok(result));
                }
            }
        }
    }
    results
}
