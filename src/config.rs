// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{config_keys, CONFIG_ENV};
use crate::error::ProvisionError;
use crate::provision::Variant;

/// Run settings resolved from command line flags and environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "stackseed", version, about = "Provision the demo Lambda stack on AWS")]
pub struct Settings {
    /// YAML stack file with a top-level `config:` mapping
    #[arg(long, env = "STACKSEED_STACK_FILE")]
    pub stack_file: Option<PathBuf>,

    /// Project name used to namespace configuration keys (`<project>:<key>`)
    #[arg(long, env = "STACKSEED_PROJECT")]
    pub project: Option<String>,

    /// Which resource set to provision
    #[arg(long, env = "STACKSEED_VARIANT", value_enum, default_value_t = Variant::Function)]
    pub variant: Variant,

    /// Directory the build artifact and archive paths are resolved against
    #[arg(long, env = "STACKSEED_WORK_DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Also write the outputs JSON to this file
    #[arg(long, env = "STACKSEED_OUTPUTS_FILE")]
    pub outputs_file: Option<PathBuf>,
}

impl Settings {
    /// Load the stack configuration: stack file first, then env overrides
    pub fn load_stack_config(&self) -> Result<StackConfig> {
        let mut config = match &self.stack_file {
            Some(path) => StackConfig::load(path, self.project.clone())?,
            None => StackConfig::new(self.project.clone()),
        };

        if let Ok(overrides) = env::var(CONFIG_ENV) {
            config
                .apply_overrides(&overrides)
                .with_context(|| format!("{} is not a valid JSON object", CONFIG_ENV))?;
        }

        Ok(config)
    }
}

#[derive(Deserialize, Debug)]
struct StackFile {
    #[serde(default)]
    config: BTreeMap<String, Value>,
}

/// Keyed configuration values for one stack
#[derive(Debug, Clone, Default)]
pub struct StackConfig {
    project: Option<String>,
    values: BTreeMap<String, Value>,
}

impl StackConfig {
    pub fn new(project: Option<String>) -> Self {
        Self {
            project,
            values: BTreeMap::new(),
        }
    }

    /// Read a stack file from disk
    pub fn load(path: &Path, project: Option<String>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stack file {}", path.display()))?;
        Self::from_yaml(&contents, project)
            .with_context(|| format!("Failed to parse stack file {}", path.display()))
    }

    pub fn from_yaml(contents: &str, project: Option<String>) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::new(project));
        }

        let file: StackFile = serde_yaml::from_str(contents)?;
        Ok(Self {
            project,
            values: file.config,
        })
    }

    /// Merge a JSON object of values over the current ones
    pub fn apply_overrides(&mut self, json: &str) -> Result<()> {
        let overrides: BTreeMap<String, Value> = serde_json::from_str(json)?;
        self.values.extend(overrides);
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Get an optional value. Project-namespaced keys win over bare keys.
    pub fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
        let value = self
            .project
            .as_ref()
            .and_then(|p| self.values.get(&format!("{}:{}", p, key)))
            .or_else(|| self.values.get(key));

        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Object(o)) if o.contains_key("secure") => Err(
                ProvisionError::InvalidConfig(format!("'{}' is an encrypted value", key)),
            ),
            Some(_) => Err(ProvisionError::InvalidConfig(format!(
                "'{}' must be a scalar value",
                key
            ))),
        }
    }

    /// Get a value that must be present
    pub fn require(&self, key: &str) -> crate::error::Result<String> {
        self.get(key)?
            .ok_or_else(|| ProvisionError::MissingConfig(key.to_string()))
    }

    /// AWS region from `aws:region`, if configured
    pub fn region(&self) -> crate::error::Result<Option<String>> {
        self.get(config_keys::AWS_REGION)
    }
}
