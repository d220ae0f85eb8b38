// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! IAM trust policy document

use crate::constants::iam::{ASSUME_ROLE_ACTION, LAMBDA_PRINCIPAL, POLICY_VERSION};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TrustPolicy {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub effect: String,
    pub principal: Principal,
    pub action: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    pub service: String,
}

impl TrustPolicy {
    /// Trust policy letting the Lambda service assume the role
    pub fn lambda_assume_role() -> Self {
        TrustPolicy {
            version: POLICY_VERSION.to_string(),
            statement: vec![Statement {
                effect: "Allow".to_string(),
                principal: Principal {
                    service: LAMBDA_PRINCIPAL.to_string(),
                },
                action: ASSUME_ROLE_ACTION.to_string(),
            }],
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check whether any statement allows `service` to assume the role
    pub fn allows_assume_role(&self, service: &str) -> bool {
        self.statement.iter().any(|s| {
            s.effect == "Allow" && s.action == ASSUME_ROLE_ACTION && s.principal.service == service
        })
    }
}
