use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::Credentials;
use crate::error::{DidError, Result};

const DEFAULT_BASE_URL: &str = "https://idonethis.com/api/v0.1/";
const BASE_URL_ENV_VAR: &str = "IDONETHIS_API_URL";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status code and decoded body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// Body-level success flag.
    pub fn is_ok(&self) -> bool {
        self.body.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Apply the shared failure policy: any status other than `expected` is
    /// an authorization failure, and a body whose `ok` flag is not true is a
    /// service failure.
    pub fn expect(self, expected: u16) -> Result<Value> {
        if self.status != expected {
            return Err(DidError::Unauthorized {
                status: self.status,
            });
        }
        self.into_ok_body()
    }

    pub fn into_ok_body(self) -> Result<Value> {
        if !self.is_ok() {
            return Err(DidError::Service {
                body: serde_json::to_string_pretty(&self.body).unwrap_or_default(),
            });
        }
        Ok(self.body)
    }
}

/// The two verbs the rest of the crate uses to talk to the API.
///
/// Paths are relative to the versioned API root (e.g. `teams/`). A transport
/// failure is an `Err`; any HTTP status is returned for the caller to judge.
#[allow(async_fn_in_trait)]
pub trait Api {
    async fn get(&self, path: &str, query: &str) -> Result<ApiResponse>;
    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse>;
}

pub struct DidClient {
    http: Client,
    base_url: Url,
    credentials: Credentials,
}

impl DidClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let base =
            std::env::var(BASE_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(credentials, &base)
    }

    pub fn with_base_url(credentials: Credentials, base: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("did-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_http(credentials, base, http)
    }

    fn with_http(credentials: Credentials, base: &str, http: Client) -> Result<Self> {
        let base_url = parse_base_url(base)?;
        debug!("API root {base_url}");

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    fn url(&self, path: &str, query: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|_| DidError::InvalidUrl(format!("{}{path}", self.base_url)))?;
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let response = request
            .header("Authorization", format!("TOKEN {}", self.credentials.token()))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(ApiResponse { status, body })
    }
}

impl Api for DidClient {
    async fn get(&self, path: &str, query: &str) -> Result<ApiResponse> {
        let url = self.url(path, query)?;
        let response = self.send(self.http.get(url.clone())).await?;
        debug!("GET {url} -> {}", response.status);
        Ok(response)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.url(path, "")?;
        let response = self.send(self.http.post(url.clone()).json(body)).await?;
        debug!("POST {url} -> {}", response.status);
        Ok(response)
    }
}

fn parse_base_url(base: &str) -> Result<Url> {
    // Url::join drops the last segment unless the base ends with a slash.
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&normalized).map_err(|_| DidError::InvalidUrl(base.to_string()))
}
