use std::net::SocketAddr;

use anyhow::Result;
use leadomat::{
    config::get_or_init_config,
    model::ModelManager,
    web::types::{CaptureAck, LeadView},
    App,
};
use reqwest::{header, redirect::Policy, Response, StatusCode};

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    pub mm: ModelManager,
}

impl TestApp {
    /// Spawns the app on a random port, backed by a fresh in-memory store.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_model(ModelManager::in_memory()).await
    }

    /// Spawns the app on a store that never answers.
    pub async fn spawn_with_store_down() -> Result<Self> {
        Self::spawn_with_model(ModelManager::unreachable()).await
    }

    /// Trying to bind port 0 will trigger an OS scan for an available port
    /// which will then be bound to the application.
    pub async fn spawn_with_model(mm: ModelManager) -> Result<Self> {
        let mut config = get_or_init_config().clone();
        config.net_config.app_port = 0;

        let app = App::build_with_model(&config, mm.clone()).await?;
        let addr = app.local_addr()?;
        tokio::spawn(leadomat::serve(app));

        // Keep cookies between requests so flash messages show up, don't follow redirects.
        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .cookie_store(true)
            .build()?;

        Ok(TestApp {
            addr,
            http_client,
            mm,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn capture_form(&self, gmail: &str) -> Result<Response> {
        let resp = self
            .http_client
            .post(self.url("/capture_lead"))
            .form(&[("gmail", gmail)])
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn capture_json(&self, body: &serde_json::Value) -> Result<Response> {
        let resp = self
            .http_client
            .post(self.url("/capture_lead"))
            .json(body)
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn capture_json_ack(&self, gmail: &str) -> Result<(StatusCode, CaptureAck)> {
        let resp = self.capture_json(&serde_json::json!({ "gmail": gmail })).await?;
        let status = resp.status();
        Ok((status, resp.json().await?))
    }

    pub async fn admin_leads(&self) -> Result<Vec<LeadView>> {
        let resp = self.http_client.get(self.url("/admin/leads")).send().await?;
        assert_eq!(StatusCode::OK, resp.status());
        Ok(resp.json().await?)
    }

    pub async fn home_html(&self) -> Result<String> {
        let resp = self.http_client.get(self.url("/")).send().await?;
        assert_eq!(StatusCode::OK, resp.status());
        Ok(resp.text().await?)
    }
}

pub fn assert_resp_redir_to(resp: &Response, location: &str) {
    assert_eq!(StatusCode::FOUND, resp.status());
    assert_eq!(
        Some(location),
        resp.headers()
            .get(header::LOCATION)
            .and_then(|loc| loc.to_str().ok())
    );
}
