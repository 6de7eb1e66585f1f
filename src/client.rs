//! REST API client implementation.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Resource;

/// Moving company REST API client.
///
/// Every resource lives under `{base_url}/api/{path}` with the usual
/// collection (`GET`, `POST`) and item (`PUT`, `DELETE`) routes.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API root (e.g., "http://localhost:5001")
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{base}/api/{path}", base = self.base_url)
    }

    fn item_url(&self, path: &str, id: i64) -> String {
        format!("{base}/api/{path}/{id}", base = self.base_url)
    }

    /// Fetch the full collection.
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let url = self.collection_url(R::PATH);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        decode(check_status(response, &url)?).await
    }

    /// Create a record and return it as stored by the server.
    pub async fn create<R: Resource>(&self, input: &R::Input) -> Result<R> {
        let url = self.collection_url(R::PATH);
        debug!("POST {url}");

        let response = self.client.post(&url).json(input).send().await?;
        decode(check_status(response, &url)?).await
    }

    /// Replace a record and return the updated version.
    pub async fn update<R: Resource>(&self, id: i64, input: &R::Input) -> Result<R> {
        let url = self.item_url(R::PATH, id);
        debug!("PUT {url}");

        let response = self.client.put(&url).json(input).send().await?;
        decode(check_status(response, &url)?).await
    }

    /// Delete a record.
    pub async fn delete<R: Resource>(&self, id: i64) -> Result<()> {
        let url = self.item_url(R::PATH, id);
        debug!("DELETE {url}");

        let response = self.client.delete(&url).send().await?;
        check_status(response, &url)?;
        Ok(())
    }
}

fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AppError::decode(format!("{e} in response body")))
}
