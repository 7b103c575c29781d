use std::env;
use std::io::ErrorKind;
use std::time::Duration;

use unicode_truncate::UnicodeTruncateStr;

use super::probe_config::ProbeConfig;
use crate::error::ConfigError;

const DEFAULT_CONFIG_FILE: &str = "config.yml";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

pub struct AppConfig {
    pub probe: ProbeConfig,
    pub listen_addr: String,
    pub max_name_width: usize,
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.probe.timeout_seconds)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.probe.refresh_interval_seconds)
    }
}

/// Load the application configuration from a YAML file and environment variables.
///
/// The file is named by `CONFIG_FILE` (default `config.yml`). A missing default
/// file is fine, built-in defaults apply; a missing file that was asked for
/// explicitly is an error. `PROBE_TIMEOUT_SECONDS`, `REFRESH_INTERVAL_SECONDS`
/// and `LISTEN_ADDR` override the file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_with(|name| env::var(name).ok())
}

fn load_config_with(var: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    let explicit_file = var("CONFIG_FILE");
    let config_file_location = explicit_file
        .clone()
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let mut probe = match std::fs::read_to_string(&config_file_location) {
        Ok(config_str) => {
            log::info!("Using config file: {}", config_file_location);
            ProbeConfig::from_yaml(&config_str)?
        }
        Err(e) if e.kind() == ErrorKind::NotFound && explicit_file.is_none() => {
            log::info!("No {} found, using built-in targets", config_file_location);
            ProbeConfig::default()
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: config_file_location,
                source,
            });
        }
    };

    if let Some(value) = var("PROBE_TIMEOUT_SECONDS") {
        probe.timeout_seconds = parse_seconds("PROBE_TIMEOUT_SECONDS", value)?;
    }
    if let Some(value) = var("REFRESH_INTERVAL_SECONDS") {
        probe.refresh_interval_seconds = parse_seconds("REFRESH_INTERVAL_SECONDS", value)?;
    }

    let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    let max_name_width = probe
        .targets
        .iter()
        .map(|target| display_width(&target.name))
        .max()
        .unwrap_or(10);

    Ok(AppConfig {
        probe,
        listen_addr,
        max_name_width,
    })
}

/// Terminal columns taken by `text`.
fn display_width(text: &str) -> usize {
    text.unicode_truncate(usize::MAX).1
}

fn parse_seconds(name: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        _ => Err(ConfigError::Env { name, value }),
    }
}
