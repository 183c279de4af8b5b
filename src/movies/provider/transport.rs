use crate::movies::{MoviesError, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

/// Status and body of a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network seam used by the fetch client and the image loader
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET. Only failures that prevent a response at all are errors;
    /// non-2xx statuses come back as a normal [`RawResponse`].
    async fn get(&self, url: &Url, headers: &[(&'static str, String)]) -> Result<RawResponse>;
}

/// Production transport backed by reqwest
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport.
    ///
    /// Without a timeout reqwest waits indefinitely, which is the historical
    /// behavior of this client.
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| MoviesError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Get the underlying reqwest client
    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url, headers: &[(&'static str, String)]) -> Result<RawResponse> {
        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn classify(err: reqwest::Error) -> MoviesError {
    if err.is_builder() {
        MoviesError::BadUrl
    } else {
        MoviesError::Unknown(err.to_string())
    }
}
