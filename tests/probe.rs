//! Probe behaviour against local servers.

mod common;

use std::time::Duration;

use chrono::{DateTime, Utc};
use common::{Reply, closed_port, spawn_server};
use upcheck::{Prober, probe_all};

const FAILURE_TEXTS: [&str; 3] = ["Timeout", "Network Error", "Connection Error"];

fn prober() -> Prober {
    Prober::with_timeout(Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn test_ok_response_is_up() {
    let server = spawn_server(|_, _| Reply::Status(200, "OK")).await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.url, server.url());
    assert_eq!(result.http_status, 200);
    assert_eq!(result.status_text, "OK");
    assert!(!result.is_down);
    assert!(result.verified);
    assert!(result.error.is_none());
    assert_eq!(server.methods(), vec!["GET"]);
}

#[tokio::test]
async fn test_server_error_is_down() {
    let server = spawn_server(|_, _| Reply::Status(503, "Service Unavailable")).await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 503);
    assert_eq!(result.status_text, "Service Unavailable");
    assert!(result.is_down);
    assert!(result.verified);
}

#[tokio::test]
async fn test_client_error_is_up() {
    let server = spawn_server(|_, _| Reply::Status(404, "Not Found")).await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 404);
    assert!(!result.is_down);
}

#[tokio::test]
async fn test_head_rejection_does_not_matter_when_get_works() {
    let server = spawn_server(|method, _| match method {
        "GET" => Reply::Status(200, "OK"),
        _ => Reply::Status(405, "Method Not Allowed"),
    })
    .await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 200);
    assert!(!result.is_down);
    assert_eq!(server.methods(), vec!["GET"]);
}

#[tokio::test]
async fn test_head_fallback_after_failed_get() {
    let server = spawn_server(|method, _| match method {
        "HEAD" => Reply::Status(204, "No Content"),
        _ => Reply::Drop,
    })
    .await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 204);
    assert!(!result.is_down);
    assert!(result.error.is_none());
    let methods = server.methods();
    assert_eq!(methods.first().map(String::as_str), Some("GET"));
    assert_eq!(methods.last().map(String::as_str), Some("HEAD"));
}

#[tokio::test]
async fn test_both_attempts_failing_is_down() {
    let server = spawn_server(|_, _| Reply::Drop).await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 0);
    assert!(result.is_down);
    assert!(result.verified);
    assert!(FAILURE_TEXTS.contains(&result.status_text.as_str()));
    assert!(result.error.is_some());
    let methods = server.methods();
    assert_eq!(methods.first().map(String::as_str), Some("GET"));
    assert_eq!(methods.last().map(String::as_str), Some("HEAD"));
}

#[tokio::test]
async fn test_timeout() {
    let server = spawn_server(|_, _| Reply::Hang).await;
    let prober = Prober::with_timeout(Duration::from_millis(300)).expect("client builds");

    let result = prober.probe_url(&server.url()).await;

    assert_eq!(result.http_status, 0);
    assert_eq!(result.status_text, "Timeout");
    assert!(result.is_down);
    assert!(result.response_time_ms >= 300);
    assert!(result.response_time_ms < 5_000);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let addr = closed_port().await;

    let result = prober().probe_url(&format!("http://{addr}")).await;

    assert_eq!(result.http_status, 0);
    assert_eq!(result.status_text, "Network Error");
    assert!(result.is_down);
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = spawn_server(|_, path| match path {
        "/final" => Reply::Status(200, "OK"),
        _ => Reply::Redirect("/final"),
    })
    .await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 200);
    assert_eq!(result.url, server.url());
    let paths: Vec<String> = server
        .requests
        .lock()
        .unwrap()
        .iter()
        .map(|(_, path)| path.clone())
        .collect();
    assert_eq!(paths, vec!["/", "/final"]);
}

#[tokio::test]
async fn test_redirect_loop_is_network_error() {
    let server = spawn_server(|_, _| Reply::Redirect("/")).await;

    let result = prober().probe_url(&server.url()).await;

    assert_eq!(result.http_status, 0);
    assert_eq!(result.status_text, "Network Error");
    assert!(result.is_down);
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_unsendable_url_is_connection_error() {
    let result = prober().probe_url("http://exa mple.com").await;

    assert_eq!(result.http_status, 0);
    assert_eq!(result.status_text, "Connection Error");
    assert!(result.is_down);
}

#[tokio::test]
async fn test_unresolvable_host() {
    let prober = Prober::with_timeout(Duration::from_secs(3)).expect("client builds");

    let result = prober.probe_url("https://upcheck-does-not-exist.invalid").await;

    assert_eq!(result.http_status, 0);
    assert!(result.is_down);
    assert!(FAILURE_TEXTS.contains(&result.status_text.as_str()));
}

#[tokio::test]
async fn test_batch_results_are_positional_and_isolated() {
    let up = spawn_server(|_, _| Reply::Status(200, "OK")).await;
    let down = spawn_server(|_, _| Reply::Status(500, "Internal Server Error")).await;
    let gone = format!("http://{}", closed_port().await);

    let urls = vec![up.url(), down.url(), gone.clone()];
    let results = probe_all(&prober(), urls).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].url, up.url());
    assert_eq!(results[0].http_status, 200);
    assert!(!results[0].is_down);
    assert_eq!(results[1].url, down.url());
    assert_eq!(results[1].http_status, 500);
    assert!(results[1].is_down);
    assert_eq!(results[2].url, gone);
    assert_eq!(results[2].http_status, 0);
    assert!(results[2].is_down);
}

#[tokio::test]
async fn test_every_result_has_time_fields() {
    let up = spawn_server(|_, _| Reply::Status(200, "OK")).await;
    let gone = format!("http://{}", closed_port().await);
    let before = Utc::now();

    let results = probe_all(&prober(), vec![up.url(), gone]).await;

    for result in results {
        assert!(result.timestamp >= before);
        let json = serde_json::to_value(&result).expect("serializable");
        let timestamp = json["timestamp"].as_str().expect("timestamp string");
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(json["responseTime"].as_u64().is_some());
    }
}
