use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tokio::time::sleep;

use upcheck::config::{AppConfig, load_config};
use upcheck::http_probe::prelude::*;
use upcheck::server::{self, AppState};
use upcheck::{HistoryLog, check_all};

#[derive(Parser)]
#[command(name = "upcheck")]
#[command(about = "Is it down? Check whether websites are up, once or on an interval")]
#[command(version)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check one or more websites once
    Check {
        /// Website to check, e.g. google, github.com or http://example.com
        #[arg(required = true)]
        urls: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
    /// Serve the JSON endpoint (POST /api/check-status)
    Serve {
        /// Listen address, overrides LISTEN_ADDR
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Keep checking the configured sites
    Watch {
        /// Run a single round and exit
        #[arg(long)]
        once: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

fn to_fixed_width(input: &str, width: usize) -> String {
    use unicode_truncate::UnicodeTruncateStr;

    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config().inspect_err(|e| log::error!("{e}"))?;
    let prober = Prober::with_timeout(config.timeout())?;

    match cli.command {
        Commands::Check { urls, format } => run_check(&prober, &urls, format).await,
        Commands::Serve { listen } => {
            let listen_addr = listen.unwrap_or_else(|| config.listen_addr.clone());
            server::serve(&listen_addr, AppState::new(prober)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Watch { once } => {
            run_watch(&prober, &config, once).await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Exits with failure when any site is down or any input was rejected.
async fn run_check(
    prober: &Prober,
    urls: &[String],
    format: OutputFormat,
) -> Result<ExitCode, Box<dyn Error>> {
    let mut all_up = true;

    for (input, outcome) in urls.iter().zip(check_all(prober, urls).await) {
        let result = match outcome {
            Ok(result) => result,
            Err(e) => match e.rejection() {
                Some(rejected) => rejected,
                None => {
                    eprintln!("{input:?}: {e}");
                    all_up = false;
                    continue;
                }
            },
        };
        all_up &= !result.is_down;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&result)?),
            OutputFormat::Human => print_result(&result),
        }
    }

    Ok(if all_up {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_result(result: &ProbeResult) {
    let icon = if result.is_down { "❌" } else { "✅" };
    println!(
        "{icon} {} - {} {}, {}ms",
        result.url, result.http_status, result.status_text, result.response_time_ms
    );
    if let Some(error) = &result.error {
        println!("   {error}");
    }
}

async fn run_watch(prober: &Prober, config: &AppConfig, once: bool) {
    let mut targets: Vec<(&str, String)> = Vec::new();
    for target in &config.probe.targets {
        match target.resolved_url() {
            Ok(url) => targets.push((target.name.as_str(), url)),
            Err(e) => log::warn!("Skipping target {}: {e}", target.name),
        }
    }

    if targets.is_empty() {
        log::warn!("No valid targets configured, nothing to watch");
        return;
    }

    let interval = config.refresh_interval();
    let mut history = HistoryLog::new();

    loop {
        let urls: Vec<String> = targets.iter().map(|(_, url)| url.clone()).collect();
        let results = probe_all(prober, urls).await;

        for ((name, url), result) in targets.iter().zip(&results) {
            history.record(url, result);
            let name = to_fixed_width(name, config.max_name_width);
            let site = history
                .site_stats(url)
                .map(|s| format!("Avg: {}ms, Uptime: {}%", s.avg_response_time, s.uptime_percentage))
                .unwrap_or_default();

            if result.is_down {
                println!(
                    "[{name}] ❌ URL: {url}, Status: {} {}, Elapsed: {}ms, {site}",
                    result.http_status, result.status_text, result.response_time_ms
                );
            } else {
                println!(
                    "[{name}] ✅ URL: {url}, Status: {} {}, Elapsed: {}ms, {site}",
                    result.http_status, result.status_text, result.response_time_ms
                );
            }
        }

        let stats = history.stats();
        println!(
            "Checks: {}, Up: {}, Down: {}, Avg response: {}ms",
            stats.total_checks, stats.up_count, stats.down_count, stats.avg_response_time
        );

        if once {
            break;
        }

        tokio::select! {
            _ = sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stopping watch");
                break;
            }
        }
    }
}
