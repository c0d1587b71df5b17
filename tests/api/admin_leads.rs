use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use crate::helpers::TestApp;

#[tokio::test]
async fn admin_leads_empty_store_is_an_empty_list() -> Result<()> {
    let app = TestApp::spawn().await?;

    assert!(app.admin_leads().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn admin_leads_newest_first() -> Result<()> {
    let app = TestApp::spawn().await?;

    app.capture_json_ack("a@gmail.com").await?;
    app.capture_json_ack("b@gmail.com").await?;

    let leads = app.admin_leads().await?;
    let emails = leads.iter().map(|lead| lead.gmail.as_str()).collect::<Vec<_>>();
    assert_eq!(vec!["b@gmail.com", "a@gmail.com"], emails);

    let timestamps = leads
        .iter()
        .map(|lead| DateTime::parse_from_rfc3339(&lead.timestamp))
        .collect::<Result<Vec<DateTime<FixedOffset>>, _>>()?;
    assert!(timestamps[0] >= timestamps[1]);
    assert!(leads[0].id > leads[1].id);

    Ok(())
}

#[tokio::test]
async fn admin_leads_duplicates_do_not_reorder() -> Result<()> {
    let app = TestApp::spawn().await?;

    app.capture_json_ack("a@gmail.com").await?;
    app.capture_json_ack("b@gmail.com").await?;
    // already on file, must not be treated as a new sighting
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
