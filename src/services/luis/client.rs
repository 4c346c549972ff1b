use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info_span, warn, Instrument};

use crate::dialog::build_reply;
use crate::error::{InputError, LuisError, Result};
use crate::request::RequestDescriptor;
use crate::response::{parse, PredictionResult};
use crate::services::luis::config::ClientConfig;
use crate::services::luis::handlers::ResponseHandlers;
use crate::services::luis::transport::{HttpTransport, Transport};

/// Prediction client bound to one application.
///
/// Cheap to clone; clones share the transport.
pub struct LuisClient<T = HttpTransport> {
    config: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T> Clone for LuisClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl LuisClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport + 'static> LuisClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Request descriptor for a fresh prediction of `text`.
    pub fn predict_request(&self, text: &str) -> Result<RequestDescriptor> {
        let text = clean_text(text)?;
        Ok(RequestDescriptor::predict(
            self.config.app_id.as_str(),
            self.config.app_key.as_str(),
            text,
            self.config.verbose,
        ))
    }

    /// Request descriptor answering `previous`'s dialog with `text`.
    pub fn reply_request(
        &self,
        text: &str,
        previous: &PredictionResult,
        force_set: Option<&str>,
    ) -> Result<RequestDescriptor> {
        build_reply(
            &self.config.app_id,
            &self.config.app_key,
            self.config.verbose,
            text,
            previous,
            force_set,
        )
    }

    pub async fn predict(&self, text: &str) -> Result<PredictionResult> {
        let request = self.predict_request(text)?;
        self.execute(request).await
    }

    pub async fn reply(
        &self,
        text: &str,
        previous: &PredictionResult,
        force_set: Option<&str>,
    ) -> Result<PredictionResult> {
        let request = self.reply_request(text, previous, force_set)?;
        self.execute(request).await
    }

    /// Sends an already built request and parses the body.
    pub async fn execute(&self, request: RequestDescriptor) -> Result<PredictionResult> {
        let span = info_span!(
            "luis_request",
            request_id = %request.request_id,
            reply = request.is_reply()
        );

        async move {
            debug!("Dispatching request");
            let body = self.transport.send(&request).await?;
            parse(&body)
        }
        .instrument(span)
        .await
    }

    /// Runs `predict` on a tokio task. Input is validated before spawning.
    pub fn predict_in_background(
        &self,
        text: &str,
    ) -> Result<JoinHandle<Result<PredictionResult>>> {
        let request = self.predict_request(text)?;
        Ok(self.spawn_execute(request))
    }

    /// Runs `reply` on a tokio task. Input is validated before spawning.
    pub fn reply_in_background(
        &self,
        text: &str,
        previous: &PredictionResult,
        force_set: Option<&str>,
    ) -> Result<JoinHandle<Result<PredictionResult>>> {
        let request = self.reply_request(text, previous, force_set)?;
        Ok(self.spawn_execute(request))
    }

    pub fn predict_with_handlers<H: ResponseHandlers>(
        &self,
        text: &str,
        handlers: H,
    ) -> Result<JoinHandle<()>> {
        let request = self.predict_request(text)?;
        Ok(self.spawn_with_handlers(request, handlers))
    }

    pub fn reply_with_handlers<H: ResponseHandlers>(
        &self,
        text: &str,
        previous: &PredictionResult,
        force_set: Option<&str>,
        handlers: H,
    ) -> Result<JoinHandle<()>> {
        let request = self.reply_request(text, previous, force_set)?;
        Ok(self.spawn_with_handlers(request, handlers))
    }

    fn spawn_execute(&self, request: RequestDescriptor) -> JoinHandle<Result<PredictionResult>> {
        let client = self.clone();
        tokio::spawn(async move { client.execute(request).await })
    }

    fn spawn_with_handlers<H: ResponseHandlers>(
        &self,
        request: RequestDescriptor,
        handlers: H,
    ) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            match client.execute(request).await {
                Ok(result) => handlers.on_success(result),
                Err(e) => {
                    warn!("Background request failed: {}", e);
                    handlers.on_failure(e)
                }
            }
        })
    }
}

impl<T> std::fmt::Debug for LuisClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LuisClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn clean_text(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LuisError::invalid("text", InputError::Empty));
    }
    Ok(text)
}
