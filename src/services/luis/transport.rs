use std::future::Future;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LuisError, Result};
use crate::request::RequestDescriptor;
use crate::response::STATUS_CODE_KEY;
use crate::services::luis::config::ClientConfig;

/// Issues one request and hands back the raw response body.
pub trait Transport: Send + Sync {
    fn send(&self, request: &RequestDescriptor) -> impl Future<Output = Result<String>> + Send;
}

/// GETs the prediction endpoint over HTTPS.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(LuisError::Http)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<String> {
        let url = request.to_url(&self.endpoint)?;
        debug!("GET {}{}", self.endpoint, url.path());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        classify(status, body)
    }
}

/// Decides whether a body goes on to the response model.
///
/// Key errors come back as a `statusCode` body on a non-success status; the
/// response model turns those into `AuthenticationError`.
fn classify(status: StatusCode, body: String) -> Result<String> {
    if status.is_success() || carries_status_code(&body) {
        return Ok(body);
    }

    warn!("Prediction endpoint returned {}", status);
    Err(LuisError::Api {
        status: status.as_u16(),
        body,
    })
}

fn carries_status_code(body: &str) -> bool {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.as_object().map(|o| o.contains_key(STATUS_CODE_KEY)))
        .unwrap_or(false)
}
