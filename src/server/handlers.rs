use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::check::check;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecentSearchesResponse {
    pub searches: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// `POST /api/check-status` with `{"url": "..."}`.
///
/// 200 with the probe result once the input validates, whether the site is
/// up or not. Input problems are answered with 400 before anything is probed.
pub async fn check_status(
    State(state): State<AppState>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::debug!("Rejected check request body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let input = request.url.unwrap_or_default();
    match check(&state.prober, &input).await {
        Ok(result) => {
            state.recent_searches.write().push(&result.url);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => match err.rejection() {
            Some(rejected) => (StatusCode::BAD_REQUEST, Json(rejected)).into_response(),
            None => error_response(StatusCode::BAD_REQUEST, err.to_string()),
        },
    }
}

/// `GET /api/recent-searches`: up to ten distinct checked URLs, newest first.
pub async fn recent_searches(State(state): State<AppState>) -> Json<RecentSearchesResponse> {
    let searches = state.recent_searches.read().urls();
    Json(RecentSearchesResponse { searches })
}
