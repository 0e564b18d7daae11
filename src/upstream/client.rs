//! Outbound HTTP client for the CWA open-data API.

use axum::http::header;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::upstream::outcome::UpstreamOutcome;

/// Client for the CWA datastore endpoint.
///
/// Holds the parsed base URL and the server-side key. The key is read-only
/// process configuration; invocations share nothing else.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl UpstreamClient {
    /// Build a client from validated configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProxyError> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Construct the upstream URL: base, then the dataset id as one path
    /// segment, then the pass-through params re-encoded as a query string.
    ///
    /// The id is pushed as a *segment*, so `/`, `?` and `#` inside it are
    /// percent-encoded and cannot reach past the datastore prefix. Repeated
    /// query keys each keep their own pair.
    pub fn build_url(
        &self,
        dataset_id: &str,
        params: &[(String, String)],
    ) -> Result<Url, ProxyError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProxyError::BaseUrlNotABase)?
            .pop_if_empty()
            .push(dataset_id);
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Perform the single outbound GET and classify the reply.
    ///
    /// The body is read fully as text before any parse attempt; a non-JSON
    /// reply then still carries its own diagnostics into the outcome.
    pub async fn fetch(
        &self,
        dataset_id: &str,
        params: &[(String, String)],
    ) -> Result<UpstreamOutcome, ProxyError> {
        let url = self.build_url(dataset_id, params)?;

        tracing::debug!(url = %url, "Forwarding request to CWA");

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("CWA {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(UpstreamOutcome::classify(status, &body))
    }
}
