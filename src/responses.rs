//! Envelope types for the JSON bodies returned by the API.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{Done, Team};

/// `GET teams/` body.
#[derive(Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub results: Vec<Team>,
}

/// `POST dones/` body.
#[derive(Deserialize)]
pub struct CreatedDoneResponse {
    pub result: Done,
}

/// Extract the server-supplied explanation from a 400 body.
pub fn error_detail(body: &Value) -> String {
    for key in ["detail", "errors", "error", "message"] {
        match body.get(key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Null) | None => {}
            Some(other) => return other.to_string(),
        }
    }
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
