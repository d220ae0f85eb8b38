// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource descriptors, the trust policy document and stack outputs.

pub mod outputs;
pub mod policy;
pub mod resources;

pub use outputs::StackOutputs;
pub use policy::TrustPolicy;
