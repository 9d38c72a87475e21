use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DidError {
    #[error("Request failed: {}", transport_detail(.0))]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request authorization failed (status {status})! Check your token!")]
    Unauthorized { status: u16 },

    #[error("Invalid request data: {detail}")]
    InvalidFilter { detail: String },

    #[error("Page not found")]
    PageNotFound,

    #[error("Something went wrong!\n{body}")]
    Service { body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "Missing API token. Set IDONETHIS_API_TOKEN, pass --api-token, or run 'did config --api-token <token>'"
    )]
    MissingToken,

    #[error("Team not specified and no defaultTeam in config")]
    NoTeam,

    #[error("You must provide your completed task!")]
    MissingTask,

    #[error("You are not a part of the team: {0}")]
    TeamNotFound(String),

    /// Not a failure: the caller simply belongs to no teams.
    #[error("You are not on any teams")]
    NoTeams,
}

impl DidError {
    /// Whether this condition should still end the process successfully.
    pub fn is_benign(&self) -> bool {
        matches!(self, DidError::NoTeams)
    }
}

/// reqwest's own message omits the cause (refused connection, DNS failure,
/// os error code), so append every source in the chain.
fn transport_detail(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !detail.contains(&text) {
            detail.push_str(": ");
            detail.push_str(&text);
        }
        source = cause.source();
    }
    detail
}

pub type Result<T> = std::result::Result<T, DidError>;
