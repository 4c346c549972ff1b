#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use luis_sdk::{ClientConfig, LuisClient, LuisError, RequestDescriptor, Transport};
use serde_json::{json, Value};

/// Replays canned bodies in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    bodies: Mutex<VecDeque<String>>,
    sent: Mutex<Vec<RequestDescriptor>>,
}

impl ScriptedTransport {
    pub fn new<I>(bodies: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self {
            bodies: Mutex::new(bodies.into_iter().map(|b| b.to_string()).collect()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<String, LuisError> {
        self.sent.lock().unwrap().push(request.clone());
        self.bodies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LuisError::Api {
                status: 503,
                body: "script exhausted".to_string(),
            })
    }
}

pub fn client(bodies: Vec<Value>) -> LuisClient<ScriptedTransport> {
    LuisClient::with_transport(
        ClientConfig::new("app-1", "key-1"),
        ScriptedTransport::new(bodies),
    )
    .unwrap()
}

pub fn minimal(query: &str, intent: &str, score: f64) -> Value {
    json!({
        "query": query,
        "topScoringIntent": { "intent": intent, "score": score },
        "entities": []
    })
}

pub fn with_dialog(query: &str, prompt: Option<&str>, context_id: &str, status: &str) -> Value {
    let mut body = minimal(query, "BookFlight", 0.9);
    let mut dialog = json!({ "contextId": context_id, "status": status });
    if let Some(p) = prompt {
        dialog["prompt"] = json!(p);
        dialog["parameterName"] = json!("destination");
    }
    body["dialog"] = dialog;
    body
}
