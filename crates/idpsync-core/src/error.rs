//! Error types for identity-provider sync

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error payload returned by the clusters management API.
///
/// Every field is optional on the wire; absent fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

impl ApiError {
    /// Whether the payload carries anything worth reporting
    pub fn is_meaningful(&self) -> bool {
        !self.reason.trim().is_empty() || !self.code.trim().is_empty()
    }
}

#[derive(Error, Debug)]
pub enum IdpSyncError {
    #[error("Build error: {message}")]
    Build { message: String },

    #[error("Remote error: {}", describe_remote(.api_error, .transport))]
    Remote { api_error: ApiError, transport: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl IdpSyncError {
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Combine a structured remote payload and the raw transport error into one
    /// failure. The structured payload wins for diagnostics; the transport
    /// message is kept alongside it.
    pub fn from_remote(api_error: Option<ApiError>, transport: impl Into<String>) -> Self {
        let transport = transport.into();
        match api_error {
            Some(api_error) if api_error.is_meaningful() => Self::Remote {
                api_error,
                transport,
            },
            _ => Self::Transport { message: transport },
        }
    }

    /// The structured remote payload, if this failure carries one
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Remote { api_error, .. } => Some(api_error),
            _ => None,
        }
    }
}

fn describe_remote(api_error: &ApiError, transport: &str) -> String {
    let mut out = if api_error.reason.trim().is_empty() {
        transport.to_string()
    } else {
        api_error.reason.clone()
    };

    let mut details = Vec::new();
    if !api_error.code.is_empty() {
        details.push(format!("code: {}", api_error.code));
    }
    if let Some(op) = api_error.operation_id.as_deref().filter(|op| !op.is_empty()) {
        details.push(format!("operation id: {}", op));
    }
    if !details.is_empty() {
        out.push_str(&format!(" ({})", details.join(", ")));
    }

    if !api_error.reason.trim().is_empty() && !transport.is_empty() {
        out.push_str(&format!(": {}", transport));
    }
    out
}

pub type Result<T> = std::result::Result<T, IdpSyncError>;
