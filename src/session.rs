// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-run provisioning session.
//!
//! A `Session` is threaded through every step of a run. It gives access to the
//! provider and stack configuration, hands out auto-generated physical names,
//! records every resource the run touched, and collects the exported outputs.
//! The outputs only become visible through [`Session::finish`], so a run that
//! fails part way publishes nothing.

use crate::config::StackConfig;
use crate::constants::NAME_SUFFIX_LEN;
use crate::provider::CloudProvider;
use crate::types::resources::ResourceKind;
use crate::types::StackOutputs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

/// A resource created or referenced during the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    /// Logical name used in logs
    pub name: String,
    /// Provider identifier (bucket name, ARN, ...)
    pub id: String,
}

pub struct Session<'a, P: CloudProvider + ?Sized> {
    provider: &'a P,
    config: &'a StackConfig,
    work_dir: PathBuf,
    resources: Vec<ResourceRecord>,
    outputs: StackOutputs,
}

impl<'a, P: CloudProvider + ?Sized> Session<'a, P> {
    pub fn new(provider: &'a P, config: &'a StackConfig) -> Self {
        Self {
            provider,
            config,
            work_dir: PathBuf::from("."),
            resources: Vec::new(),
            outputs: StackOutputs::default(),
        }
    }

    /// Resolve local paths against `work_dir` instead of the process directory
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(path)
    }

    pub fn provider(&self) -> &'a P {
        self.provider
    }

    pub fn config(&self) -> &'a StackConfig {
        self.config
    }

    /// Physical name for an auto-named resource: `<logical>-<random suffix>`
    pub fn physical_name(&self, logical: &str) -> String {
        format!("{}-{}", logical, random_suffix())
    }

    pub fn record(&mut self, kind: ResourceKind, name: &str, id: &str) {
        debug!("Recorded {} '{}' ({})", kind, name, id);
        self.resources.push(ResourceRecord {
            kind,
            name: name.to_string(),
            id: id.to_string(),
        });
    }

    pub fn resources(&self) -> &[ResourceRecord] {
        &self.resources
    }

    pub fn export(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!("Exporting output {}={}", key, value);
        self.outputs.insert(key, value);
    }

    /// End the run and hand back the published outputs
    pub fn finish(self) -> StackOutputs {
        info!(
            "Run complete: {} resources, {} outputs",
            self.resources.len(),
            self.outputs.len()
        );
        self.outputs
    }
}

fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..NAME_SUFFIX_LEN].to_string()
}
