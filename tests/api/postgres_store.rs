//! The same flows against a real Postgres, each test on its own freshly migrated database.
//! Run with `cargo test -- --ignored` once the database from `config/base.toml` is up.

use anyhow::Result;
use leadomat::{
    config::get_or_init_config,
    model::{CaptureOutcome, LeadBmc, ModelManager},
    web::types::HealthStatus,
};
use reqwest::StatusCode;

use crate::helpers::TestApp;

async fn spawn_pg_app() -> Result<TestApp> {
    let mm = ModelManager::init_test(get_or_init_config()).await?;
    TestApp::spawn_with_model(mm).await
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn pg_capture_is_insert_if_absent() -> Result<()> {
    let mm = ModelManager::init_test(get_or_init_config()).await?;
    let email = "Foo@Gmail.com";

    let CaptureOutcome::Created(lead) = LeadBmc::capture(&mm, email).await? else {
        panic!("first capture must create the lead");
    };
    assert_eq!("Foo@Gmail.com", lead.gmail);
    assert!(matches!(
        LeadBmc::capture(&mm, email).await?,
        CaptureOutcome::Duplicate
    ));

    assert_eq!(vec![lead], LeadBmc::list(&mm).await?);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn pg_admin_leads_newest_first() -> Result<()> {
    let app = spawn_pg_app().await?;

    app.capture_json_ack("a@gmail.com").await?;
    app.capture_json_ack("b@gmail.com").await?;
    app.capture_json_ack("a@gmail.com").await?;

    let emails = app
        .admin_leads()
        .await?
        .into_iter()
        .map(|lead| lead.gmail)
        .collect::<Vec<_>>();
    assert_eq!(vec!["b@gmail.com", "a@gmail.com"], emails);

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running Postgres"]
async fn pg_healthcheck_reports_server_time() -> Result<()> {
    let app = spawn_pg_app().await?;

    let res = app.http_client.get(app.url("/health")).send().await?;
    assert_eq!(StatusCode::OK, res.status());

    let health: HealthStatus = res.json().await?;
    assert_eq!("healthy", health.status);

    Ok(())
}
