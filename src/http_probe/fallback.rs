//! Two-step request pipeline: a primary attempt and one fallback attempt.

use std::future::Future;

/// Which attempt produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Primary,
    Fallback,
}

/// Run `primary`; only if it fails, run `fallback`.
///
/// When both fail the primary error is returned. The fallback's error is
/// discarded, since the first failure is the one worth reporting.
pub async fn first_ok<T, E, E2, P, F, Fut>(primary: P, fallback: F) -> Result<(T, Step), E>
where
    P: Future<Output = Result<T, E>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E2>>,
{
    let primary_err = match primary.await {
        Ok(value) => return Ok((value, Step::Primary)),
        Err(err) => err,
    };

    match fallback().await {
        Ok(value) => Ok((value, Step::Fallback)),
        Err(_) => Err(primary_err),
    }
}
