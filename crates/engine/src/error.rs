// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker provisioning errors.

use drover_adapters::{ProbeError, RuntimeError};
use drover_core::{AddressError, PortError, PortSpec, WorkerId};
use thiserror::Error;

/// Step of the provisioning sequence that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Create,
    Start,
    Inspect,
    Binding,
    Readiness,
}

drover_core::simple_display! {
    Stage {
        Config => "config",
        Create => "create",
        Start => "start",
        Inspect => "inspect",
        Binding => "binding",
        Readiness => "readiness",
    }
}

/// Errors from [`crate::WorkerManager::start_worker`].
///
/// Every variant carrying an `id` was rolled back before being returned.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("invalid port configuration: {0}")]
    Config(#[from] PortError),

    #[error("failed to create container: {0}")]
    Create(#[source] RuntimeError),

    #[error("failed to start container {id}: {source}")]
    Start { id: WorkerId, source: RuntimeError },

    #[error("failed to inspect container {id}: {source}")]
    Inspect { id: WorkerId, source: RuntimeError },

    #[error("container {id} reports no binding for {port}")]
    Binding { id: WorkerId, port: PortSpec },

    #[error("no reachable address for container {id}: {source}")]
    Address { id: WorkerId, source: AddressError },

    #[error("invalid service URL for container {id}: {source}")]
    Url { id: WorkerId, source: url::ParseError },

    #[error("container {id} did not become ready: {source}")]
    Readiness { id: WorkerId, source: ProbeError },
}

impl StartError {
    pub fn stage(&self) -> Stage {
        match self {
            StartError::Config(_) => Stage::Config,
            StartError::Create(_) => Stage::Create,
            StartError::Start { .. } => Stage::Start,
            StartError::Inspect { .. } => Stage::Inspect,
            StartError::Binding { .. } | StartError::Address { .. } | StartError::Url { .. } => {
                Stage::Binding
            }
            StartError::Readiness { .. } => Stage::Readiness,
        }
    }

    /// Id of the container that was created (and rolled back), if any.
    pub fn worker_id(&self) -> Option<&WorkerId> {
        match self {
            StartError::Config(_) | StartError::Create(_) => None,
            StartError::Start { id, .. }
            | StartError::Inspect { id, .. }
            | StartError::Binding { id, .. }
            | StartError::Address { id, .. }
            | StartError::Url { id, .. }
            | StartError::Readiness { id, .. } => Some(id),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
