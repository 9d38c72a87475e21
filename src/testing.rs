//! In-memory `Api` used by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::client::{Api, ApiResponse};
use crate::config::{Config, ConfigKey, Credentials};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get { path: String, query: String },
    Post { path: String, body: Value },
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct FakeApi {
    responses: RefCell<VecDeque<ApiResponse>>,
    requests: RefCell<Vec<Request>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: Value) -> Self {
        self.responses
            .borrow_mut()
            .push_back(ApiResponse { status, body });
        self
    }

    /// Queue a `GET teams/` reply listing `(name, short_name)` pairs.
    pub fn with_teams(self, teams: &[(&str, &str)]) -> Self {
        let results: Vec<Value> = teams
            .iter()
            .map(|(name, short)| json!({"name": name, "short_name": short}))
            .collect();
        self.respond(200, json!({"ok": true, "results": results}))
    }

    /// Queue a successful `POST dones/` reply echoing `raw_text`.
    pub fn with_created(self, raw_text: &str) -> Self {
        self.respond(
            201,
            json!({
                "ok": true,
                "result": {
                    "owner": "ada",
                    "raw_text": raw_text,
                    "done_date": "2024-03-01"
                }
            }),
        )
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub fn posts(&self) -> Vec<Value> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Request::Post { body, .. } => Some(body.clone()),
                Request::Get { .. } => None,
            })
            .collect()
    }

    fn next(&self) -> ApiResponse {
        self.responses
            .borrow_mut()
            .pop_front()
            .expect("no response queued for request")
    }
}

impl Api for FakeApi {
    async fn get(&self, path: &str, query: &str) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(Request::Get {
            path: path.to_string(),
            query: query.to_string(),
        });
        Ok(self.next())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(Request::Post {
            path: path.to_string(),
            body: body.clone(),
        });
        Ok(self.next())
    }
}

pub fn credentials() -> Credentials {
    let mut config = Config::default();
    config.set(ConfigKey::ApiToken, "test-token");
    config.credentials(None).expect("test token should resolve")
}
