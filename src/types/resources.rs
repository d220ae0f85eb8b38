// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Descriptors for the resources a provisioning run creates or references.
//!
//! `*Args` types are inputs handed to the provider, the plain types are what the
//! provider reports back once the resource exists.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Bucket,
    Parameter,
    Policy,
    Role,
    RolePolicyAttachment,
    Archive,
    Function,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Bucket => "bucket",
            ResourceKind::Parameter => "parameter",
            ResourceKind::Policy => "policy",
            ResourceKind::Role => "role",
            ResourceKind::RolePolicyAttachment => "role policy attachment",
            ResourceKind::Archive => "archive",
            ResourceKind::Function => "function",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketArgs {
    /// Physical bucket name, already auto-named
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: String,
}

/// SSM parameter types supported by the run. Only plain strings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "String",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterArgs {
    pub name: String,
    pub parameter_type: ParameterType,
    pub value: String,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub version: i64,
}

/// A pre-existing managed policy resolved by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleArgs {
    pub name: String,
    /// Serialized trust policy document
    pub assume_role_policy: String,
    pub description: String,
    /// Managed policies attached as part of role creation
    pub managed_policy_arns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePolicyAttachment {
    pub role: String,
    pub policy_arn: String,
}

/// A zip bundle built from a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    pub output_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionArgs {
    pub name: String,
    pub handler: String,
    pub runtime: String,
    /// Zip file holding the function code
    pub code: PathBuf,
    /// Execution role ARN
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub arn: String,
}
