// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AWS implementation of the provider seam, backed by the official SDK clients.

use crate::error::{ProvisionError, Result};
use crate::provider::CloudProvider;
use crate::types::resources::{
    Bucket, BucketArgs, Function, FunctionArgs, Parameter, ParameterArgs, Policy, ResourceKind,
    Role, RoleArgs, RolePolicyAttachment,
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_iam::types::PolicyScopeType;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, Runtime};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use tracing::{debug, info, instrument};

/// S3 rejects an explicit location constraint for this region
const DEFAULT_S3_REGION: &str = "us-east-1";

pub struct AwsProvider {
    s3: aws_sdk_s3::Client,
    ssm: aws_sdk_ssm::Client,
    iam: aws_sdk_iam::Client,
    lambda: aws_sdk_lambda::Client,
    region: Option<String>,
}

impl AwsProvider {
    /// Build clients from the default credential chain, optionally pinning the region
    pub async fn new(region: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region));
        }
        let config = loader.load().await;
        Self::from_conf(&config)
    }

    pub fn from_conf(config: &SdkConfig) -> Self {
        Self {
            s3: aws_sdk_s3::Client::new(config),
            ssm: aws_sdk_ssm::Client::new(config),
            iam: aws_sdk_iam::Client::new(config),
            lambda: aws_sdk_lambda::Client::new(config),
            region: config.region().map(|r| r.as_ref().to_string()),
        }
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

/// Location constraint for a new bucket; `None` in the default region
fn bucket_configuration(region: Option<&str>) -> Option<CreateBucketConfiguration> {
    let region = region.filter(|r| *r != DEFAULT_S3_REGION)?;
    debug!("Setting bucket location constraint {}", region);
    Some(
        CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build(),
    )
}

#[async_trait]
impl CloudProvider for AwsProvider {
    #[instrument(skip(self, args), fields(bucket = %args.name))]
    async fn create_bucket(&self, args: &BucketArgs) -> Result<Bucket> {
        let request = self
            .s3
            .create_bucket()
            .bucket(&args.name)
            .set_create_bucket_configuration(bucket_configuration(self.region()));

        request.send().await.map_err(|e| {
            ProvisionError::creation(
                ResourceKind::Bucket,
                &args.name,
                DisplayErrorContext(e).to_string(),
            )
        })?;

        Ok(Bucket {
            id: args.name.clone(),
        })
    }

    #[instrument(skip(self, args), fields(parameter = %args.name))]
    async fn put_parameter(&self, args: &ParameterArgs) -> Result<Parameter> {
        let output = self
            .ssm
            .put_parameter()
            .name(&args.name)
            .value(&args.value)
            .r#type(aws_sdk_ssm::types::ParameterType::from(
                args.parameter_type.as_str(),
            ))
            .overwrite(args.overwrite)
            .send()
            .await
            .map_err(|e| {
                ProvisionError::creation(
                    ResourceKind::Parameter,
                    &args.name,
                    aws_sdk_ssm::error::DisplayErrorContext(e).to_string(),
                )
            })?;

        Ok(Parameter {
            name: args.name.clone(),
            version: output.version(),
        })
    }

    #[instrument(skip(self))]
    async fn lookup_policy(&self, name: &str) -> Result<Policy> {
        let mut policies = self
            .iam
            .list_policies()
            .scope(PolicyScopeType::Aws)
            .into_paginator()
            .items()
            .send();

        while let Some(policy) = policies.try_next().await.map_err(|e| {
            ProvisionError::PolicyLookup(aws_sdk_iam::error::DisplayErrorContext(e).to_string())
        })? {
            if policy.policy_name() != Some(name) {
                continue;
            }

            let Some(arn) = policy.arn() else {
                return Err(ProvisionError::PolicyLookup(format!(
                    "Policy {} has no ARN",
                    name
                )));
            };
            debug!("Resolved policy {} to {}", name, arn);
            return Ok(Policy {
                name: name.to_string(),
                arn: arn.to_string(),
            });
        }

        Err(ProvisionError::PolicyNotFound(name.to_string()))
    }

    #[instrument(skip(self, args), fields(role = %args.name))]
    async fn create_role(&self, args: &RoleArgs) -> Result<Role> {
        let output = self
            .iam
            .create_role()
            .role_name(&args.name)
            .assume_role_policy_document(&args.assume_role_policy)
            .description(&args.description)
            .send()
            .await
            .map_err(|e| {
                ProvisionError::creation(
                    ResourceKind::Role,
                    &args.name,
                    aws_sdk_iam::error::DisplayErrorContext(e).to_string(),
                )
            })?;

        let Some(created) = output.role() else {
            return Err(ProvisionError::creation(
                ResourceKind::Role,
                &args.name,
                "CreateRole response did not include the role",
            ));
        };

        let role = Role {
            name: created.role_name().to_string(),
            arn: created.arn().to_string(),
        };

        for policy_arn in &args.managed_policy_arns {
            info!("Attaching managed policy {} to role {}", policy_arn, role.name);
            self.iam
                .attach_role_policy()
                .role_name(&role.name)
                .policy_arn(policy_arn)
                .send()
                .await
                .map_err(|e| {
                    ProvisionError::creation(
                        ResourceKind::Role,
                        &args.name,
                        aws_sdk_iam::error::DisplayErrorContext(e).to_string(),
                    )
                })?;
        }

        Ok(role)
    }

    #[instrument(skip(self, role, policy), fields(role = %role.name, policy = %policy.arn))]
    async fn attach_role_policy(
        &self,
        role: &Role,
        policy: &Policy,
    ) -> Result<RolePolicyAttachment> {
        let attachment_name = format!("{}/{}", role.name, policy.name);

        self.iam
            .attach_role_policy()
            .role_name(&role.name)
            .policy_arn(&policy.arn)
            .send()
            .await
            .map_err(|e| {
                ProvisionError::creation(
                    ResourceKind::RolePolicyAttachment,
                    &attachment_name,
                    aws_sdk_iam::error::DisplayErrorContext(e).to_string(),
                )
            })?;

        Ok(RolePolicyAttachment {
            role: role.name.clone(),
            policy_arn: policy.arn.clone(),
        })
    }

    #[instrument(skip(self, args), fields(function = %args.name))]
    async fn create_function(&self, args: &FunctionArgs) -> Result<Function> {
        let zip = tokio::fs::read(&args.code).await.map_err(|e| {
            ProvisionError::Archive(format!(
                "Failed to read function code {}: {}",
                args.code.display(),
                e
            ))
        })?;

        let output = self
            .lambda
            .create_function()
            .function_name(&args.name)
            .role(&args.role)
            .handler(&args.handler)
            .runtime(Runtime::from(args.runtime.as_str()))
            .code(FunctionCode::builder().zip_file(Blob::new(zip)).build())
            .send()
            .await
            .map_err(|e| {
                ProvisionError::creation(
                    ResourceKind::Function,
                    &args.name,
                    aws_sdk_lambda::error::DisplayErrorContext(e).to_string(),
                )
            })?;

        let Some(arn) = output.function_arn() else {
            return Err(ProvisionError::creation(
                ResourceKind::Function,
                &args.name,
                "CreateFunction response did not include the function ARN",
            ));
        };

        Ok(Function {
            name: args.name.clone(),
            arn: arn.to_string(),
        })
    }
}
