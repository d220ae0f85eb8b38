// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provisioning runs for the three stack variants.
//!
//! Every run is a straight chain of steps. The first failing step ends the run
//! and its error is returned as is; resources created by earlier steps are left
//! in place and no outputs are published.

pub mod steps;

use crate::constants::outputs;
use crate::error::Result;
use crate::provider::CloudProvider;
use crate::session::Session;
use crate::types::StackOutputs;
use clap::ValueEnum;
use tracing::info;

/// Resource set to provision
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Bucket and parameter
    Minimal,
    /// Minimal plus an execution role carrying the managed policy
    Role,
    /// Role with an explicit policy attachment plus the Lambda function
    Function,
}

pub async fn run<P: CloudProvider + ?Sized>(
    session: Session<'_, P>,
    variant: Variant,
) -> Result<StackOutputs> {
    info!("Provisioning {:?} stack", variant);
    match variant {
        Variant::Minimal => run_minimal(session).await,
        Variant::Role => run_role(session).await,
        Variant::Function => run_function(session).await,
    }
}

async fn run_minimal<P: CloudProvider + ?Sized>(
    mut session: Session<'_, P>,
) -> Result<StackOutputs> {
    let inputs = steps::read_inputs(session.config())?;
    let bucket = steps::create_bucket(&mut session, &inputs.bucket_name).await?;
    let parameter =
        steps::create_parameter(&mut session, &inputs.ssm_name, &inputs.ssm_value).await?;

    session.export(outputs::BUCKET_NAME, bucket.id);
    session.export(outputs::SSM_NAME, parameter.name);
    Ok(session.finish())
}

async fn run_role<P: CloudProvider + ?Sized>(mut session: Session<'_, P>) -> Result<StackOutputs> {
    let inputs = steps::read_inputs(session.config())?;
    let bucket = steps::create_bucket(&mut session, &inputs.bucket_name).await?;
    let parameter =
        steps::create_parameter(&mut session, &inputs.ssm_name, &inputs.ssm_value).await?;
    let policy = steps::lookup_execution_policy(&mut session).await?;
    let trust_policy = steps::build_trust_policy()?;
    steps::create_role(&mut session, trust_policy, vec![policy.arn]).await?;

    session.export(outputs::BUCKET_NAME, bucket.id);
    session.export(outputs::SSM_NAME, parameter.name);
    Ok(session.finish())
}

async fn run_function<P: CloudProvider + ?Sized>(
    mut session: Session<'_, P>,
) -> Result<StackOutputs> {
    let inputs = steps::read_inputs(session.config())?;
    let bucket = steps::create_bucket(&mut session, &inputs.bucket_name).await?;
    let parameter =
        steps::create_parameter(&mut session, &inputs.ssm_name, &inputs.ssm_value).await?;
    let policy = steps::lookup_execution_policy(&mut session).await?;
    let trust_policy = steps::build_trust_policy()?;
    let role = steps::create_role(&mut session, trust_policy, Vec::new()).await?;
    steps::attach_policy(&mut session, &role, &policy).await?;
    let archive = steps::package_code(&mut session)?;
    let function = steps::create_function(&mut session, &role, &archive).await?;

    session.export(outputs::BUCKET_NAME, bucket.id);
    session.export(outputs::SSM_NAME, parameter.name);
    session.export(outputs::LAMBDA_ARN, function.arn);
    Ok(session.finish())
}
