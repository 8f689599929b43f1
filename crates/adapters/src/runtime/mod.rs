// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container runtime client.
//!
//! The lifecycle manager only ever issues four calls, always for a single
//! container it created itself:
//!
//! ```text
//! create(spec) ──► start(id) ──► inspect(id) ──► ... ──► remove(id)
//!                     │               │
//!                     └── on failure ─┴──────────────────► remove(id)
//! ```

mod docker;

pub use docker::DockerCli;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRuntime, RuntimeCall, RuntimeStage};

use async_trait::async_trait;
use drover_core::{ContainerSpec, NetworkSnapshot, WorkerId};
use thiserror::Error;

/// Errors from runtime operations
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to exec {program}: {source}")]
    Exec { program: String, source: std::io::Error },
    #[error("{command} failed: {stderr}")]
    Command { command: String, stderr: String },
    #[error("unexpected runtime output: {0}")]
    Output(String),
    #[error("{0}")]
    Other(String),
}

/// Minimal container runtime surface.
///
/// Implementations must be safe to call concurrently from many requests
/// without external locking.
#[async_trait]
pub trait RuntimeClient: Send + Sync + 'static {
    /// Create (but do not start) a container, returning its id.
    async fn create(&self, spec: &ContainerSpec) -> Result<WorkerId, RuntimeError>;

    async fn start(&self, id: &WorkerId) -> Result<(), RuntimeError>;

    /// Read the network state of a started container.
    async fn inspect(&self, id: &WorkerId) -> Result<NetworkSnapshot, RuntimeError>;

    /// Force-remove a container together with its anonymous volumes.
    async fn remove(&self, id: &WorkerId) -> Result<(), RuntimeError>;
}
