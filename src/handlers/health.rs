use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub upstream: String,
}

/// Simple liveness endpoint for probes. No host check on purpose; load
/// balancers hit this by IP. There is no dependency to ping here (the
/// upstream is only touched per request), so we just echo which upstream
/// this deployment is wired to.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "Quartermaster is healthy!".to_string(),
        upstream: state.upstream_base.clone(),
    };

    (StatusCode::OK, Json(response))
}
