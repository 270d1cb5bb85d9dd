//! HTTP client for the Loftbook API
//!
//! Thin wrapper over reqwest with a cookie store, so the admin session
//! cookie survives across calls within a run.

use anyhow::{anyhow, Result};
use serde_json::json;

use loftbook_core::rows::SkillRow;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Whether the current session is admin. Network failures degrade to
    /// read-only rather than surfacing an error.
    pub async fn admin_status(&self) -> bool {
        let Ok(resp) = self.http.get(self.url("/api/admin")).send().await else {
            return false;
        };
        let Ok(body) = resp.json::<serde_json::Value>().await else {
            return false;
        };
        body.get("isAdmin").and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Authenticate with the shared passcode, then verify the session
    /// actually took by re-checking admin status.
    pub async fn login(&self, password: &str) -> Result<bool> {
        let resp = self
            .http
            .post(self.url("/api/auth"))
            .json(&json!({ "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Unlock failed: {}", body));
        }

        Ok(self.admin_status().await)
    }

    pub async fn logout(&self) -> Result<()> {
        self.http
            .post(self.url("/api/logout"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Fetch the remote document. Errors bubble up so callers decide
    /// whether to ignore them (startup does).
    pub async fn fetch_skills(&self) -> Result<Vec<SkillRow>> {
        let resp = self
            .http
            .get(self.url("/api/skills"))
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Push the whole row sequence; the server replaces the document.
    pub async fn save_skills(&self, rows: &[SkillRow]) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/api/skills"))
            .json(&rows)
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("Save failed: {}", body));
        }

        Ok(())
    }
}
