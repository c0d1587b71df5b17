//! Tests whether the 'health' route reports the store as alive

use anyhow::Result;
use chrono::DateTime;
use leadomat::web::{types::HealthStatus, REQUEST_ID_HEADER};
use reqwest::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/health")).send().await?;
    assert_eq!(StatusCode::OK, res.status(), "Healthcheck FAILED!");

    let health: HealthStatus = res.json().await?;
    assert_eq!("healthy", health.status);
    assert!(DateTime::parse_from_rfc3339(&health.timestamp).is_ok());

    Ok(())
}

#[tokio::test]
async fn healthcheck_ok_regardless_of_lead_count() -> Result<()> {
    let app = TestApp::spawn().await?;
    for gmail in ["a@gmail.com", "b@gmail.com", "c@gmail.com"] {
        app.capture_json_ack(gmail).await?;
    }

    let health: HealthStatus = app
        .http_client
        .get(app.url("/health"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!("healthy", health.status);

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/health")).send().await?;

    assert!(res.headers().contains_key(REQUEST_ID_HEADER));

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app.http_client.get(app.url("/invalidpath")).send().await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}
