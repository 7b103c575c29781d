use serde::Deserialize;
use url::Url;

use crate::error::CheckError;
use crate::normalize::{NormalizedUrl, validate};

/// Probe settings and the list of sites the watch loop keeps an eye on.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Seconds between two rounds of the watch loop.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,

    /// Deadline for a single probe, GET and HEAD fallback included.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Sites to watch. Defaults to a handful of popular websites.
    #[serde(default = "default_targets")]
    pub targets: Vec<TargetConfig>,
}

/// A watched site: a display name and whatever the user would type for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetConfig {
    pub name: String,
    pub url: String,
}

impl TargetConfig {
    /// The URL to probe and to key history by.
    ///
    /// An `http(s)://` URL is taken as written once it parses, so
    /// `https://www.google.com` keeps its `www` host. Anything without a
    /// scheme is normalized like user input.
    pub fn resolved_url(&self) -> Result<String, CheckError> {
        let url = self.url.trim();
        if !url.contains("://") {
            return validate(url).map(NormalizedUrl::into_string);
        }

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
            _ => Err(CheckError::InvalidUrl {
                input: self.url.clone(),
            }),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: default_refresh_interval(),
            timeout_seconds: default_timeout(),
            targets: default_targets(),
        }
    }
}

impl ProbeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_timeout() -> u64 {
    10
}

fn default_targets() -> Vec<TargetConfig> {
    [
        ("Google", "https://www.google.com"),
        ("GitHub", "https://www.github.com"),
        ("Twitter", "https://www.twitter.com"),
        ("Facebook", "https://www.facebook.com"),
        ("ChatGPT", "https://chat.openai.com"),
        ("Canva", "https://www.canva.com"),
        ("Instagram", "https://www.instagram.com"),
        ("Amazon", "https://www.amazon.com"),
    ]
    .into_iter()
    .map(|(name, url)| TargetConfig {
        name: name.to_string(),
        url: url.to_string(),
    })
    .collect()
}
