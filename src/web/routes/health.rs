use axum::{extract::State, Json};
use chrono::SecondsFormat;

use crate::{
    web::{types::HealthStatus, WebResult},
    AppState,
};

/// Liveness: answers as long as the store can tell us the time.
pub async fn health_check(State(app_state): State<AppState>) -> WebResult<Json<HealthStatus>> {
    let server_time = app_state.model_mgr.server_time().await?;

    Ok(Json(HealthStatus {
        status: "healthy".to_string(),
        timestamp: server_time.to_rfc3339_opts(SecondsFormat::Micros, true),
    }))
}
