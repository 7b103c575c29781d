//! Website uptime checking: normalize what the user typed, probe it once
//! with a GET (falling back to HEAD), and classify the answer.

pub mod check;
pub mod config;
pub mod error;
pub mod history;
pub mod http_probe;
pub mod normalize;
pub mod server;

pub use check::{check, check_all};
pub use error::{CheckError, ConfigError, ServerError};
pub use history::{HistoryEntry, HistoryLog, HistoryStats, RecentSearches, SiteStats};
pub use http_probe::prelude::*;
pub use normalize::{NormalizedUrl, has_tld, is_valid_domain, normalize, validate};
