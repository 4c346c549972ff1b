use url::Url;
use uuid::Uuid;

use crate::error::{LuisError, Result};

/// Path template of the v2 prediction endpoint.
const PREDICT_PATH: &str = "/luis/v2.0/apps/{app_id}";

/// Everything the request issuer needs to call the prediction endpoint.
///
/// A plain prediction leaves `context_id` and `force_set` empty; a dialog
/// reply carries the context token of the turn it answers.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub request_id: Uuid,
    pub app_id: String,
    pub app_key: String,
    pub query: String,
    pub verbose: bool,
    pub context_id: Option<String>,
    pub force_set: Option<String>,
}

impl RequestDescriptor {
    pub fn predict(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        query: impl Into<String>,
        verbose: bool,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            app_id: app_id.into(),
            app_key: app_key.into(),
            query: query.into(),
            verbose,
            context_id: None,
            force_set: None,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.context_id.is_some()
    }

    /// Full GET url against `endpoint`. Query values are percent-encoded.
    pub fn to_url(&self, endpoint: &str) -> Result<Url> {
        let base = format!(
            "{}{}",
            endpoint.trim_end_matches('/'),
            PREDICT_PATH.replace("{app_id}", &self.app_id)
        );
        let mut url = Url::parse(&base)
            .map_err(|e| LuisError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("subscription-key", &self.app_key);
            pairs.append_pair("q", &self.query);
            if let Some(context_id) = &self.context_id {
                pairs.append_pair("contextid", context_id);
            }
            pairs.append_pair("verbose", if self.verbose { "true" } else { "false" });
            if let Some(name) = &self.force_set {
                pairs.append_pair("forceset", name);
            }
        }

        Ok(url)
    }
}
