use anyhow::Context;
use axum::{extract::State, response::Html};
use tower_cookies::Cookies;

use crate::{
    web::{flash, WebResult},
    AppState,
};

/// The landing page. Shows a pending flash error once.
#[tracing::instrument(name = "home", skip_all)]
pub async fn home(State(app_state): State<AppState>, cookies: Cookies) -> WebResult<Html<String>> {
    let mut ctx = tera::Context::new();

    if let Some(error_msg) = flash::take_flash_error(&cookies, &app_state.cookie_key)? {
        ctx.insert("error_message", &error_msg);
    }

    let body = app_state
        .templ_mgr
        .render_html_to_string(&ctx, "home.html")
        .context("tera failed to render 'html/home.html' template")?;

    Ok(Html(body))
}
