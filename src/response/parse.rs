use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

use crate::error::{InputError, LuisError, Result};
use crate::response::types::{PredictionPayload, PredictionResult};

/// Key the service uses to report key errors inside an otherwise normal body.
pub const STATUS_CODE_KEY: &str = "statusCode";

/// A service body, either still serialized or already parsed.
#[derive(Debug, Clone)]
pub enum RawResponse<'a> {
    Text(&'a str),
    Json(Value),
}

impl<'a> From<&'a str> for RawResponse<'a> {
    fn from(text: &'a str) -> Self {
        RawResponse::Text(text)
    }
}

impl<'a> From<&'a String> for RawResponse<'a> {
    fn from(text: &'a String) -> Self {
        RawResponse::Text(text.as_str())
    }
}

impl From<Value> for RawResponse<'_> {
    fn from(value: Value) -> Self {
        RawResponse::Json(value)
    }
}

/// Projects a service body onto a [`PredictionResult`].
///
/// Fails with `InvalidInput` for a null or empty body, `AuthenticationError`
/// when the body carries a `statusCode` key, and `MalformedPayload` for
/// anything that is not JSON or lacks `query`, `topScoringIntent` or
/// `entities`. Nothing is normalized or range checked.
pub fn parse<'a>(raw: impl Into<RawResponse<'a>>) -> Result<PredictionResult> {
    let value = match raw.into() {
        RawResponse::Text(text) => {
            if text.is_empty() {
                return Err(LuisError::invalid("response", InputError::Empty));
            }
            serde_json::from_str::<Value>(text)?
        }
        RawResponse::Json(value) => value,
    };

    let object = match value {
        Value::Null => return Err(LuisError::invalid("response", InputError::Null)),
        Value::Object(object) => object,
        other => {
            return Err(LuisError::MalformedPayload(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            )))
        }
    };

    if object.is_empty() {
        return Err(LuisError::invalid("response", InputError::Empty));
    }
    check_status_code(&object)?;

    let payload: PredictionPayload = serde_json::from_value(Value::Object(object))?;
    let result = PredictionResult::from(payload);
    debug!(
        "Parsed prediction: top intent '{}', {} entities, dialog: {}",
        result.top_intent().name,
        result.entities().len(),
        result.dialog().map(|d| d.status()).unwrap_or("none")
    );
    Ok(result)
}

fn check_status_code(object: &Map<String, Value>) -> Result<()> {
    if let Some(code) = object.get(STATUS_CODE_KEY) {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Invalid subscription key");
        return Err(LuisError::AuthenticationError(format!(
            "{} (statusCode {})",
            message, code
        )));
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl FromStr for PredictionResult {
    type Err = LuisError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

impl TryFrom<Value> for PredictionResult {
    type Error = LuisError;

    fn try_from(value: Value) -> Result<Self> {
        parse(value)
    }
}
