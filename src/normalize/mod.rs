//! Turns free-form user input into a probeable website URL.

pub mod domain;

use std::fmt;

use url::Url;

use crate::error::CheckError;
pub use domain::{has_tld, is_valid_domain};

const HTTP_SCHEME: &str = "http://";
const HTTPS_SCHEME: &str = "https://";
const DEFAULT_TLD: &str = ".com";

/// A scheme-qualified URL without trailing slash whose host passed
/// [`is_valid_domain`]. Only [`validate`] creates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize user input into `{scheme}{host}`.
///
/// - Trims whitespace and slashes, lower-cases everything
/// - Keeps `http://` only if the input had it, otherwise uses `https://`
/// - Drops leading `www.` labels and anything after the host
/// - Appends `.com` when the host has no TLD
///
/// Never fails. Garbage in still yields a string; [`validate`] decides
/// whether it is worth probing.
pub fn normalize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let url = lowered.trim_matches('/');

    let scheme = if url.starts_with(HTTP_SCHEME) {
        HTTP_SCHEME
    } else {
        HTTPS_SCHEME
    };

    let mut host = url
        .strip_prefix(HTTP_SCHEME)
        .or_else(|| url.strip_prefix(HTTPS_SCHEME))
        .unwrap_or(url);
    while let Some(rest) = host.strip_prefix("www.") {
        host = rest;
    }
    let host = host.split(['/', '?', '#']).next().unwrap_or_default();
    // A bare "www" would come back as "www.com" and lose its prefix on the next pass
    let host = if host == "www" { "" } else { host };

    if has_tld(host) {
        format!("{scheme}{host}")
    } else {
        format!("{scheme}{host}{DEFAULT_TLD}")
    }
}

/// Normalize `input` and make sure the result is a URL with a plausible
/// website host. Nothing here touches the network.
pub fn validate(input: &str) -> Result<NormalizedUrl, CheckError> {
    if input.trim().is_empty() {
        return Err(CheckError::MissingUrl);
    }

    let normalized = normalize(input);
    let invalid_url = || CheckError::InvalidUrl {
        input: input.to_string(),
    };

    let parsed = Url::parse(&normalized).map_err(|_| invalid_url())?;
    let host = parsed.host_str().ok_or_else(invalid_url)?;

    if !is_valid_domain(host) {
        log::debug!("Rejecting {normalized}: host {host} is not a valid domain");
        return Err(CheckError::InvalidDomain { url: normalized });
    }

    Ok(NormalizedUrl(normalized))
}
