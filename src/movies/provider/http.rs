use super::endpoint::Endpoint;
use super::transport::{ReqwestTransport, Transport};
use crate::config::ApiConfig;
use crate::movies::{MoviesError, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";
pub const REQUEST_TYPE_HEADER: &str = "Type";

/// Fetch client for the movies API
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl HttpClient {
    /// Create a new HTTP client over an existing transport
    pub fn new(transport: Arc<dyn Transport>, config: &ApiConfig) -> Self {
        if config.key.is_empty() {
            warn!("No API key configured; upstream requests will most likely be rejected");
        }

        Self {
            transport,
            base_url: config.base_url.clone(),
            api_key: config.key.clone(),
            api_host: config.host.clone(),
        }
    }

    /// Create a client backed by reqwest
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent, config.timeout())?;
        Ok(Self::new(Arc::new(transport), config))
    }

    /// Shared transport, for components that fetch outside the API
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Build full URL from endpoint
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url> {
        endpoint.url(&self.base_url)
    }

    fn headers(&self, endpoint: &Endpoint) -> [(&'static str, String); 3] {
        [
            (API_KEY_HEADER, self.api_key.clone()),
            (API_HOST_HEADER, self.api_host.clone()),
            (REQUEST_TYPE_HEADER, endpoint.request_type().to_string()),
        ]
    }

    /// Execute the endpoint's request and return the raw body.
    ///
    /// Fails with `Server` for non-2xx statuses and `NoData` for an empty body.
    pub async fn fetch(&self, endpoint: &Endpoint) -> Result<Vec<u8>> {
        let url = self.url(endpoint)?;
        debug!(
            "API request: {} (page: {:?}) {} {}",
            endpoint.request_type(),
            endpoint.upstream_page(),
            endpoint.method(),
            url
        );

        let response = self.transport.get(&url, &self.headers(endpoint)).await?;
        debug!(
            "API response: HTTP {} ({} bytes)",
            response.status,
            response.body.len()
        );

        if !response.is_success() {
            debug!(
                "Error body: {}",
                String::from_utf8_lossy(&response.body)
            );
            return Err(MoviesError::Server(response.status));
        }

        if response.body.is_empty() {
            warn!("Empty response for {}", endpoint.request_type());
            return Err(MoviesError::NoData);
        }

        Ok(response.body)
    }

    /// Execute the request and decode the JSON body into `T`
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let body = self.fetch(endpoint).await?;
        Self::decode(&body)
    }

    pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| {
            debug!("Decoding error: {e}");
            MoviesError::from(e)
        })
    }
}
