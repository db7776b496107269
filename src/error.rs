use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgReposError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("GitHub client error: {0}")]
    GitHub(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OrgReposError>;

/// Upstream collection a request was made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Organizations,
    Repositories(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Organizations => write!(f, "organizations"),
            Resource::Repositories(org) => write!(f, "repositories for {org}"),
        }
    }
}

/// Failure of a single list request. Stored in the report, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to retrieve {resource}. Status code: {status_code}")]
    RemoteFetchFailure { resource: Resource, status_code: u16 },

    #[error("Failed to retrieve {resource}: {message}")]
    Transport { resource: Resource, message: String },

    #[error("Failed to decode {resource}: {message}")]
    Decode { resource: Resource, message: String },
}
