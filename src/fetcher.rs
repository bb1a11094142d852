use reqwest::Client;
use std::collections::BTreeMap;
use url::Url;

use crate::error::AnalyzeError;
use crate::http_client::build_http_client;
use crate::models::FetchResult;

/// Upper bound on the whole fetch, connect to last body byte.
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Response headers worth keeping in the report. Anything absent is simply
/// omitted, never defaulted.
pub const CAPTURED_HEADERS: [&str; 4] = ["x-robots-tag", "content-type", "content-language", "link"];

/// Retrieves the raw HTML a crawler would receive for a URL.
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(FETCH_TIMEOUT_SECS)?,
        })
    }

    /// Issues a single GET with the crawler request profile. Any transport
    /// failure is a [`AnalyzeError::Fetch`]; HTTP error statuses are still
    /// results, the status lands in the report.
    pub async fn fetch(&self, url: &Url) -> Result<FetchResult, AnalyzeError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AnalyzeError::Fetch(e.to_string()))?;

        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for name in CAPTURED_HEADERS {
            if let Some(value) = response.headers().get(name).and_then(|v| v.to_str().ok()) {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AnalyzeError::Fetch(e.to_string()))?;
        let html_size_bytes = bytes.len();
        let html = String::from_utf8_lossy(&bytes).into_owned();

        tracing::debug!(url = %url, status, bytes = html_size_bytes, "fetched document");

        Ok(FetchResult {
            status,
            html_size_bytes,
            headers,
            html,
        })
    }
}
