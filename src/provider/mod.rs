// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cloud provider seam: one primitive per resource the run touches.

pub mod aws;

use crate::error::Result;
use crate::types::resources::{
    Bucket, BucketArgs, Function, FunctionArgs, Parameter, ParameterArgs, Policy, Role, RoleArgs,
    RolePolicyAttachment,
};
use async_trait::async_trait;

pub use aws::AwsProvider;

#[async_trait]
pub trait CloudProvider: Send + Sync {
    async fn create_bucket(&self, args: &BucketArgs) -> Result<Bucket>;

    /// Write a parameter, replacing an existing one when `args.overwrite` is set
    async fn put_parameter(&self, args: &ParameterArgs) -> Result<Parameter>;

    /// Resolve a provider-managed policy by name
    async fn lookup_policy(&self, name: &str) -> Result<Policy>;

    async fn create_role(&self, args: &RoleArgs) -> Result<Role>;

    async fn attach_role_policy(&self, role: &Role, policy: &Policy)
        -> Result<RolePolicyAttachment>;

    async fn create_function(&self, args: &FunctionArgs) -> Result<Function>;
}
