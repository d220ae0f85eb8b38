// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

use crate::types::resources::ResourceKind;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("Missing required configuration value '{0}'")]
    MissingConfig(String),

    #[error("Invalid stack configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to create {kind} '{name}': {message}")]
    ResourceCreation {
        kind: ResourceKind,
        name: String,
        message: String,
    },

    #[error("Managed policy '{0}' not found")]
    PolicyNotFound(String),

    #[error("Policy lookup failed: {0}")]
    PolicyLookup(String),

    #[error("Failed to serialize trust policy: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Build artifact not found at {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Failed to package archive: {0}")]
    Archive(String),
}

impl ProvisionError {
    pub fn creation(kind: ResourceKind, name: &str, message: impl Into<String>) -> Self {
        ProvisionError::ResourceCreation {
            kind,
            name: name.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
