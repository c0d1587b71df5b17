//! Contains all the routes that this application can handle.

mod admin;
mod capture;
mod health;
mod home;

// re-export errors
pub use capture::CaptureError;

use crate::AppState;

use axum::{
    routing::{get, post},
    Router,
};

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/capture_lead", post(capture::capture_lead))
        .route("/health", get(health::health_check))
        .with_state(app_state.clone())
        .nest("/admin", admin_routes(app_state))
}

/// ADMIN - Routes nested under "/admin" path
fn admin_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/leads", get(admin::list_leads))
        .with_state(app_state)
}
