//! REST client for the path service.

use std::time::Duration;

use tracing::{debug, info};
use url::Url;
use voicepath_protocols::{Path, SavePathRequest, SavePathResponse, SearchResponse};

use crate::error::ApiError;

pub struct PathApiClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl PathApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        // a trailing slash keeps `join` from dropping the last path segment
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: Url::parse(&base)?,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /paths`. Returns the stored path id when the server reports one.
    pub async fn save_path(
        &self,
        session_id: &str,
        path: &Path,
    ) -> Result<SavePathResponse, ApiError> {
        let url = self.base_url.join("paths")?;
        let body = SavePathRequest::from_path(session_id, path);
        debug!("Saving path '{}' ({} steps)", path.task_intent(), path.len());

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let response = check_status(response).await?;
        let saved: SavePathResponse = response.json().await?;
        if !saved.success {
            return Err(ApiError::Rejected(
                saved.message.unwrap_or_else(|| "save rejected".to_string()),
            ));
        }

        info!(
            "Saved path '{}' as {}",
            path.task_intent(),
            saved.path_id.as_deref().unwrap_or("<unknown>")
        );
        Ok(saved)
    }

    /// `GET /paths/search`, best match first.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
        domain: Option<&str>,
    ) -> Result<Vec<Path>, ApiError> {
        let url = self.base_url.join("paths/search")?;
        let mut params: Vec<(&str, String)> =
            vec![("query", query.to_string()), ("limit", limit.to_string())];
        if let Some(domain) = domain {
            params.push(("domain", domain.to_string()));
        }

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;
        let response = check_status(response).await?;
        let found: SearchResponse = response.json().await?;
        let paths = found.into_paths();
        debug!("Search '{}' matched {} path(s)", query, paths.len());
        Ok(paths)
    }

    fn request_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout.as_millis() as u64)
        } else {
            ApiError::Request(e)
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
