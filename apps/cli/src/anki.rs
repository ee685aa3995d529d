//! Minimal AnkiConnect client.
//!
//! AnkiConnect speaks a JSON-RPC-like protocol: every call is a POST of
//! `{"action", "params", "version": 6}` and every reply is an object with
//! exactly two fields, `error` and `result`. Anything else is treated as a
//! fatal protocol violation.

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use textdeck_core::QuizItem;

/// AnkiConnect API version pinned by the protocol.
pub const PROTOCOL_VERSION: u32 = 6;

/// Default local AnkiConnect endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8765";

/// Errors from talking to AnkiConnect.
#[derive(Debug, Error)]
pub enum AnkiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Error reported by the backend, surfaced verbatim.
    #[error("Backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Serialize)]
struct RpcRequest {
    action: &'static str,
    params: Value,
    version: u32,
}

/// Client holding the endpoint and connection pool.
pub struct AnkiClient {
    client: Client,
    endpoint: String,
}

impl AnkiClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Create a deck, or succeed silently if it already exists.
    pub async fn create_deck(&self, deck: &str) -> Result<Value, AnkiError> {
        self.invoke("createDeck", json!({ "deck": deck })).await
    }

    /// Add one quiz item as a Basic note.
    pub async fn add_note(&self, deck: &str, item: &QuizItem) -> Result<Value, AnkiError> {
        let params = json!({
            "note": {
                "deckName": deck,
                "modelName": "Basic",
                "fields": {
                    "Front": item.prompt,
                    "Back": item.answer,
                },
            }
        });
        self.invoke("addNote", params).await
    }

    /// List the names of all existing decks.
    pub async fn deck_names(&self) -> Result<Vec<String>, AnkiError> {
        let result = self.invoke("deckNames", json!({})).await?;
        serde_json::from_value(result).map_err(|e| AnkiError::MalformedResponse(e.to_string()))
    }

    async fn invoke(&self, action: &'static str, params: Value) -> Result<Value, AnkiError> {
        let request = RpcRequest {
            action,
            params,
            version: PROTOCOL_VERSION,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnkiError::Network(e.to_string()))?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AnkiError::MalformedResponse(e.to_string()))?;

        validate_response(body)
    }
}

/// Enforce the two-field `{error, result}` reply contract and unwrap the
/// result.
fn validate_response(body: Value) -> Result<Value, AnkiError> {
    let Value::Object(mut fields) = body else {
        return Err(AnkiError::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    };

    if fields.len() != 2 {
        return Err(AnkiError::MalformedResponse(
            "response has an unexpected number of fields".to_string(),
        ));
    }
    let Some(error) = fields.remove("error") else {
        return Err(AnkiError::MalformedResponse(
            "response is missing required error field".to_string(),
        ));
    };
    let Some(result) = fields.remove("result") else {
        return Err(AnkiError::MalformedResponse(
            "response is missing required result field".to_string(),
        ));
    };

    match error {
        Value::Null => Ok(result),
        Value::String(message) => Err(AnkiError::Backend(message)),
        other => Err(AnkiError::Backend(other.to_string())),
    }
}
