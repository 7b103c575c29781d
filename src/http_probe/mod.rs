pub mod batch;
pub mod classify;
pub mod fallback;
pub mod probe;
pub mod result;

pub mod prelude {
    pub use super::batch::probe_all;
    pub use super::classify::{AttemptError, FailureKind, classify};
    pub use super::probe::Prober;
    pub use super::result::ProbeResult;
}

use std::fmt::Write;

/// Flatten an error and its `source()` chain into a single line.
pub fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": {}", src);
        err = src;
    }
    s
}
