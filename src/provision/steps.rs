// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Individual provisioning steps.
//!
//! Each step takes the session plus the results of the steps it depends on and
//! returns the descriptor of the resource it created or resolved.

use crate::archive::package_file;
use crate::config::StackConfig;
use crate::constants::{config_keys, function, iam};
use crate::error::Result;
use crate::provider::CloudProvider;
use crate::session::Session;
use crate::types::resources::{
    Archive, Bucket, BucketArgs, Function, FunctionArgs, Parameter, ParameterArgs, ParameterType,
    Policy, ResourceKind, Role, RoleArgs, RolePolicyAttachment,
};
use crate::types::TrustPolicy;
use tracing::{info, instrument};

/// Logical name of the parameter resource
const PARAMETER_RESOURCE: &str = "lambdaParam";

/// Values read from the stack configuration before anything is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub bucket_name: String,
    pub ssm_name: String,
    pub ssm_value: String,
}

pub fn read_inputs(config: &StackConfig) -> Result<Inputs> {
    let bucket_name = config.require(config_keys::BUCKET_NAME)?;
    let ssm_name = config.require(config_keys::SSM_NAME)?;
    let ssm_value = config.get(config_keys::SSM_VALUE)?.unwrap_or_default();

    Ok(Inputs {
        bucket_name,
        ssm_name,
        ssm_value,
    })
}

#[instrument(skip(session))]
pub async fn create_bucket<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
    name: &str,
) -> Result<Bucket> {
    let args = BucketArgs {
        name: session.physical_name(name),
    };
    info!("Creating bucket {}", args.name);

    let bucket = session.provider().create_bucket(&args).await?;
    session.record(ResourceKind::Bucket, name, &bucket.id);
    Ok(bucket)
}

#[instrument(skip(session, value))]
pub async fn create_parameter<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
    name: &str,
    value: &str,
) -> Result<Parameter> {
    let args = ParameterArgs {
        name: name.to_string(),
        parameter_type: ParameterType::String,
        value: value.to_string(),
        overwrite: true,
    };
    info!("Writing parameter {}", args.name);

    let parameter = session.provider().put_parameter(&args).await?;
    session.record(ResourceKind::Parameter, PARAMETER_RESOURCE, &parameter.name);
    Ok(parameter)
}

/// Resolve the managed Lambda execution policy. A missing policy means the
/// account lacks its expected baseline and is fatal.
#[instrument(skip(session))]
pub async fn lookup_execution_policy<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
) -> Result<Policy> {
    let policy = session
        .provider()
        .lookup_policy(iam::BASIC_EXECUTION_POLICY)
        .await?;
    session.record(ResourceKind::Policy, &policy.name, &policy.arn);
    Ok(policy)
}

pub fn build_trust_policy() -> Result<String> {
    TrustPolicy::lambda_assume_role().to_json()
}

#[instrument(skip(session, trust_policy))]
pub async fn create_role<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
    trust_policy: String,
    managed_policy_arns: Vec<String>,
) -> Result<Role> {
    let args = RoleArgs {
        name: iam::ROLE_NAME.to_string(),
        assume_role_policy: trust_policy,
        description: iam::ROLE_DESCRIPTION.to_string(),
        managed_policy_arns,
    };
    info!("Creating role {}", args.name);

    let role = session.provider().create_role(&args).await?;
    session.record(ResourceKind::Role, &role.name, &role.arn);
    Ok(role)
}

#[instrument(skip(session, role, policy), fields(role = %role.name, policy = %policy.name))]
pub async fn attach_policy<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
    role: &Role,
    policy: &Policy,
) -> Result<RolePolicyAttachment> {
    info!("Attaching policy {} to role {}", policy.name, role.name);

    let attachment = session.provider().attach_role_policy(role, policy).await?;
    session.record(
        ResourceKind::RolePolicyAttachment,
        "lambdaPolicyAttachment",
        &format!("{}/{}", attachment.role, attachment.policy_arn),
    );
    Ok(attachment)
}

/// Zip the function's build artifact. A missing artifact is fatal, not retried.
pub fn package_code<P: CloudProvider + ?Sized>(session: &mut Session<'_, P>) -> Result<Archive> {
    let source = session.resolve(function::ARTIFACT_PATH);
    let output = session.resolve(function::ARCHIVE_PATH);

    let archive = package_file(&source, &output)?;
    info!(
        "Packaged {} into {} ({} bytes)",
        archive.source_path.display(),
        archive.output_path.display(),
        archive.output_size
    );
    session.record(
        ResourceKind::Archive,
        function::ARCHIVE_TYPE,
        &archive.output_path.display().to_string(),
    );
    Ok(archive)
}

#[instrument(skip(session, role, archive), fields(role = %role.arn))]
pub async fn create_function<P: CloudProvider + ?Sized>(
    session: &mut Session<'_, P>,
    role: &Role,
    archive: &Archive,
) -> Result<Function> {
    let args = FunctionArgs {
        name: function::NAME.to_string(),
        handler: function::HANDLER.to_string(),
        runtime: function::RUNTIME.to_string(),
        code: archive.output_path.clone(),
        role: role.arn.clone(),
    };
    info!("Creating function {} ({})", args.name, args.runtime);

    let created = session.provider().create_function(&args).await?;
    session.record(ResourceKind::Function, &created.name, &created.arn);
    Ok(created)
}
