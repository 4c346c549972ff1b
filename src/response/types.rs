use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Status token the service uses once every dialog parameter is resolved.
pub const DIALOG_FINISHED: &str = "Finished";

/// The service's interpretation of one query.
///
/// Built once by [`crate::response::parse`]. When the service sends no
/// `intents` key, `intents` holds only the top intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    query: String,
    #[serde(rename = "topScoringIntent")]
    top_intent: Intent,
    intents: Vec<Intent>,
    entities: Vec<Entity>,
    composite_entities: Vec<CompositeEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dialog: Option<Dialog>,
}

impl PredictionResult {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn top_intent(&self) -> &Intent {
        &self.top_intent
    }

    /// All intents in service order. Holds exactly the top intent when the
    /// service sent no `intents` list.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn composite_entities(&self) -> &[CompositeEntity] {
        &self.composite_entities
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// Rebuilds the wire payload this result was parsed from.
    pub fn to_payload(&self) -> crate::error::Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Top level of the service body, before the intent list is defaulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictionPayload {
    query: String,
    top_scoring_intent: Intent,
    intents: Option<Vec<Intent>>,
    entities: Vec<Entity>,
    #[serde(default)]
    composite_entities: Vec<CompositeEntity>,
    dialog: Option<Dialog>,
}

impl From<PredictionPayload> for PredictionResult {
    fn from(payload: PredictionPayload) -> Self {
        let intents = payload
            .intents
            .unwrap_or_else(|| vec![payload.top_scoring_intent.clone()]);

        Self {
            query: payload.query,
            top_intent: payload.top_scoring_intent,
            intents,
            entities: payload.entities,
            composite_entities: payload.composite_entities,
            dialog: payload.dialog,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    #[serde(rename = "intent")]
    pub name: String,
    /// Confidence, in [0, 1] in practice. Not range checked.
    pub score: f64,
    /// Only dialog-triggered intents carry actions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub triggered: bool,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub required: bool,
    #[serde(rename = "value", deserialize_with = "null_as_empty")]
    pub values: Vec<ParameterValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue {
    #[serde(rename = "entity")]
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Normalized value (dates, numbers, ...) passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Value>,
}

/// A labeled span or extracted value within the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "entity")]
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Character offsets into the query, passed through as sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeEntity {
    pub parent_type: String,
    pub value: String,
    pub children: Vec<CompositeEntityChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeEntityChild {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub value: String,
}

/// Multi-turn slot filling state attached to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameter_name: Option<String>,
    context_id: String,
    status: String,
}

impl Dialog {
    /// Question to show the user. Absent once the dialog is finished.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Slot the service is currently resolving, if any.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref()
    }

    /// Opaque token to echo back on the next reply.
    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == DIALOG_FINISHED
    }
}

// The key must be present; a null or empty list means no values.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
