//! What clients get back when the store can't be reached.

use anyhow::Result;
use leadomat::web::{types::CaptureAck, REQUEST_ID_HEADER};
use reqwest::{Response, StatusCode};
use serde_json::Value;

use crate::helpers::{assert_resp_redir_to, TestApp};

async fn assert_store_unavailable(resp: Response) -> Result<()> {
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, resp.status());
    let req_id = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|id| id.to_str().ok())
        .map(str::to_string);

    let body: Value = resp.json().await?;
    assert_eq!("StoreUnavailable", body["error"]["message"]);
    assert_eq!(req_id.as_deref(), body["error"]["data"]["req_id"].as_str());

    Ok(())
}

#[tokio::test]
async fn healthcheck_store_down_is_a_server_error() -> Result<()> {
    let app = TestApp::spawn_with_store_down().await?;

    let resp = app.http_client.get(app.url("/health")).send().await?;
    assert_store_unavailable(resp).await
}

#[tokio::test]
async fn admin_leads_store_down_is_a_server_error() -> Result<()> {
    let app = TestApp::spawn_with_store_down().await?;

    let resp = app.http_client.get(app.url("/admin/leads")).send().await?;
    assert_store_unavailable(resp).await
}

#[tokio::test]
async fn capture_json_store_down_is_a_server_error() -> Result<()> {
    let app = TestApp::spawn_with_store_down().await?;

    let (status, ack) = app.capture_json_ack("le_guin@gmail.com").await?;

    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
    assert!(!ack.success);
    assert!(ack.message.is_none());
    let error = ack.error.unwrap_or_default();
    assert!(error.starts_with("model error"), "error: {error}");

    Ok(())
}

#[tokio::test]
async fn capture_form_store_down_redirects_with_a_flash_shown_once() -> Result<()> {
    let app = TestApp::spawn_with_store_down().await?;
    let expected_err_str = "An error occurred. Please try again.";

    let resp = app.capture_form("le_guin@gmail.com").await?;
    assert_resp_redir_to(&resp, "/");

    // the landing page needs no store
    let html_page = app.home_html().await?;
    assert!(html_page.contains(expected_err_str));

    let html_page = app.home_html().await?;
    assert!(!html_page.contains(expected_err_str));

    Ok(())
}

#[tokio::test]
async fn capture_blank_store_down_is_still_a_noop() -> Result<()> {
    let app = TestApp::spawn_with_store_down().await?;

    let resp = app.capture_json(&serde_json::json!({ "gmail": "  " })).await?;
    assert_eq!(StatusCode::OK, resp.status());
    let ack: CaptureAck = resp.json().await?;
    assert!(ack.success);

    Ok(())
}
