use thiserror::Error;

use crate::persona::{Capability, Persona};
use crate::views::ViewGroupKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no {group} entry matches key '{key}'")]
    NotFound { group: ViewGroupKind, key: String },
    #[error("required element '#{id}' is missing from the page")]
    MissingElement { id: String },
    #[error("{persona} persona cannot {capability}")]
    CapabilityDenied {
        persona: Persona,
        capability: Capability,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("local storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write '{key}' to local storage: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to serialize '{key}': {reason}")]
    Serialize { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid widget config overrides: {0}")]
    InvalidOverrides(String),
    #[error("unknown persona '{0}'")]
    UnknownPersona(String),
}
