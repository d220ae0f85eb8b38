// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Stack configuration keys read by the provisioning run
pub mod config_keys {
    pub const BUCKET_NAME: &str = "bucketName";
    pub const SSM_NAME: &str = "ssmName";
    pub const SSM_VALUE: &str = "ssmValue";
    /// Provider-namespaced key selecting the AWS region
    pub const AWS_REGION: &str = "aws:region";
}

/// Names of the published stack outputs
pub mod outputs {
    pub const BUCKET_NAME: &str = "bucketName";
    pub const SSM_NAME: &str = "ssmName";
    pub const LAMBDA_ARN: &str = "lambdaArn";
}

/// Fixed IAM settings for the function execution role
pub mod iam {
    pub const ROLE_NAME: &str = "goLambdaRole";
    pub const ROLE_DESCRIPTION: &str = "IAM role for the Golang Lambda Function";
    /// AWS-managed policy granting CloudWatch Logs access to Lambda
    pub const BASIC_EXECUTION_POLICY: &str = "AWSLambdaBasicExecutionRole";
    pub const POLICY_VERSION: &str = "2012-10-17";
    pub const LAMBDA_PRINCIPAL: &str = "lambda.amazonaws.com";
    pub const ASSUME_ROLE_ACTION: &str = "sts:AssumeRole";
}

/// Fixed Lambda function settings
pub mod function {
    pub const NAME: &str = "go-lambda-function";
    pub const HANDLER: &str = "main";
    /// The provided.al2023 runtime requires the executable to be named `bootstrap`
    pub const RUNTIME: &str = "provided.al2023";
    pub const ARTIFACT_PATH: &str = "./hello-world-lambda/bootstrap";
    pub const ARCHIVE_PATH: &str = "function.zip";
    pub const ARCHIVE_TYPE: &str = "zip";
}

/// Length of the random suffix appended to auto-named resources
pub const NAME_SUFFIX_LEN: usize = 7;

/// Environment variable carrying a JSON object of configuration overrides
pub const CONFIG_ENV: &str = "STACKSEED_CONFIG";
