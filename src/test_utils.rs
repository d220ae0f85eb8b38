// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities: an in-memory cloud provider.

use crate::error::{ProvisionError, Result};
use crate::provider::CloudProvider;
use crate::types::resources::{
    Bucket, BucketArgs, Function, FunctionArgs, Parameter, ParameterArgs, Policy, ResourceKind,
    Role, RoleArgs, RolePolicyAttachment,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, Mutex};

pub const ACCOUNT_ID: &str = "123456789012";
pub const BASIC_EXECUTION_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Provider operations, used to inject failures and to inspect call order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateBucket,
    PutParameter,
    LookupPolicy,
    CreateRole,
    AttachRolePolicy,
    CreateFunction,
}

#[derive(Default)]
struct MockState {
    calls: Vec<Operation>,
    failing: HashSet<Operation>,
    buckets: BTreeSet<String>,
    parameters: BTreeMap<String, (String, i64)>,
    policies: BTreeMap<String, String>,
    roles: BTreeMap<String, RoleArgs>,
    attachments: Vec<RolePolicyAttachment>,
    functions: BTreeMap<String, FunctionArgs>,
}

/// In-memory provider that behaves like a fresh AWS account with the
/// AWS-managed Lambda execution policy available.
#[derive(Clone)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    pub fn new() -> Self {
        let mut state = MockState::default();
        state.policies.insert(
            "AWSLambdaBasicExecutionRole".to_string(),
            BASIC_EXECUTION_POLICY_ARN.to_string(),
        );
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Make every call of `op` fail with a provider error
    pub fn fail_on(self, op: Operation) -> Self {
        self.state.lock().unwrap().failing.insert(op);
        self
    }

    /// Remove a managed policy from the account
    pub fn without_policy(self, name: &str) -> Self {
        self.state.lock().unwrap().policies.remove(name);
        self
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn buckets(&self) -> Vec<String> {
        self.state.lock().unwrap().buckets.iter().cloned().collect()
    }

    pub fn parameter(&self, name: &str) -> Option<(String, i64)> {
        self.state.lock().unwrap().parameters.get(name).cloned()
    }

    pub fn role(&self, name: &str) -> Option<RoleArgs> {
        self.state.lock().unwrap().roles.get(name).cloned()
    }

    pub fn role_count(&self) -> usize {
        self.state.lock().unwrap().roles.len()
    }

    pub fn attachments(&self) -> Vec<RolePolicyAttachment> {
        self.state.lock().unwrap().attachments.clone()
    }

    pub fn function(&self, name: &str) -> Option<FunctionArgs> {
        self.state.lock().unwrap().functions.get(name).cloned()
    }

    pub fn function_count(&self) -> usize {
        self.state.lock().unwrap().functions.len()
    }

    /// Record the call and report whether it should fail
    fn enter(&self, op: Operation) -> bool {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        state.failing.contains(&op)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn role_arn(name: &str) -> String {
    format!("arn:aws:iam::{}:role/{}", ACCOUNT_ID, name)
}

#[async_trait]
impl CloudProvider for MockProvider {
    async fn create_bucket(&self, args: &BucketArgs) -> Result<Bucket> {
        if self.enter(Operation::CreateBucket) {
            return Err(ProvisionError::creation(
                ResourceKind::Bucket,
                &args.name,
                "AccessDenied",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if !state.buckets.insert(args.name.clone()) {
            return Err(ProvisionError::creation(
                ResourceKind::Bucket,
                &args.name,
                "BucketAlreadyExists",
            ));
        }

        Ok(Bucket {
            id: args.name.clone(),
        })
    }

    async fn put_parameter(&self, args: &ParameterArgs) -> Result<Parameter> {
        if self.enter(Operation::PutParameter) {
            return Err(ProvisionError::creation(
                ResourceKind::Parameter,
                &args.name,
                "AccessDenied",
            ));
        }

        let mut state = self.state.lock().unwrap();
        let version = match state.parameters.get(&args.name) {
            Some(_) if !args.overwrite => {
                return Err(ProvisionError::creation(
                    ResourceKind::Parameter,
                    &args.name,
                    "ParameterAlreadyExists",
                ));
            }
            Some((_, version)) => version + 1,
            None => 1,
        };
        state
            .parameters
            .insert(args.name.clone(), (args.value.clone(), version));

        Ok(Parameter {
            name: args.name.clone(),
            version,
        })
    }

    async fn lookup_policy(&self, name: &str) -> Result<Policy> {
        if self.enter(Operation::LookupPolicy) {
            return Err(ProvisionError::PolicyLookup("AccessDenied".to_string()));
        }

        let state = self.state.lock().unwrap();
        let Some(arn) = state.policies.get(name) else {
            return Err(ProvisionError::PolicyNotFound(name.to_string()));
        };

        Ok(Policy {
            name: name.to_string(),
            arn: arn.clone(),
        })
    }

    async fn create_role(&self, args: &RoleArgs) -> Result<Role> {
        if self.enter(Operation::CreateRole) {
            return Err(ProvisionError::creation(
                ResourceKind::Role,
                &args.name,
                "AccessDenied",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if state.roles.contains_key(&args.name) {
            return Err(ProvisionError::creation(
                ResourceKind::Role,
                &args.name,
                "EntityAlreadyExists",
            ));
        }
        state.roles.insert(args.name.clone(), args.clone());

        Ok(Role {
            name: args.name.clone(),
            arn: role_arn(&args.name),
        })
    }

    async fn attach_role_policy(
        &self,
        role: &Role,
        policy: &Policy,
    ) -> Result<RolePolicyAttachment> {
        if self.enter(Operation::AttachRolePolicy) {
            return Err(ProvisionError::creation(
                ResourceKind::RolePolicyAttachment,
                &role.name,
                "AccessDenied",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if !state.roles.contains_key(&role.name) {
            return Err(ProvisionError::creation(
                ResourceKind::RolePolicyAttachment,
                &role.name,
                "NoSuchEntity",
            ));
        }

        let attachment = RolePolicyAttachment {
            role: role.name.clone(),
            policy_arn: policy.arn.clone(),
        };
        state.attachments.push(attachment.clone());
        Ok(attachment)
    }

    async fn create_function(&self, args: &FunctionArgs) -> Result<Function> {
        if self.enter(Operation::CreateFunction) {
            return Err(ProvisionError::creation(
                ResourceKind::Function,
                &args.name,
                "AccessDenied",
            ));
        }

        let mut state = self.state.lock().unwrap();
        if !state.roles.keys().any(|name| role_arn(name) == args.role) {
            return Err(ProvisionError::creation(
                ResourceKind::Function,
                &args.name,
                "InvalidParameterValueException: role cannot be assumed",
            ));
        }
        if state.functions.contains_key(&args.name) {
            return Err(ProvisionError::creation(
                ResourceKind::Function,
                &args.name,
                "ResourceConflictException",
            ));
        }
        state.functions.insert(args.name.clone(), args.clone());

        Ok(Function {
            name: args.name.clone(),
            arn: format!(
                "arn:aws:lambda:us-east-1:{}:function:{}",
                ACCOUNT_ID, args.name
            ),
        })
    }
}
