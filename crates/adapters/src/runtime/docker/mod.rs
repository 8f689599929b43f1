// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Docker runtime client driven through the `docker` CLI.
//!
//! # Module layout
//!
//! - [`args`]: renders a [`ContainerSpec`] into `docker create` arguments
//! - [`inspect`]: parses `docker inspect` network settings
//!
//! Each call is a single CLI invocation, so concurrent requests never share
//! mutable client state.

mod args;
mod inspect;

use super::{RuntimeClient, RuntimeError};
use async_trait::async_trait;
use drover_core::{ContainerSpec, NetworkSnapshot, WorkerId};

/// Go template that makes `docker inspect` print only the network settings.
const NETWORK_SETTINGS_FORMAT: &str = "{{json .NetworkSettings}}";

/// Runtime client backed by the Docker CLI.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    /// Run a docker CLI command and return trimmed stdout on success.
    async fn run(&self, args: &[String]) -> Result<String, RuntimeError> {
        let output = tokio::process::Command::new(&self.program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RuntimeError::Exec { program: self.program.clone(), source })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(RuntimeError::Command {
                command: format!("{} {}", self.program, args.first().map_or("", String::as_str)),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

#[async_trait]
impl RuntimeClient for DockerCli {
    async fn create(&self, spec: &ContainerSpec) -> Result<WorkerId, RuntimeError> {
        let stdout = self.run(&args::create_args(spec)).await?;
        // `docker create` may print pull progress or warnings first; the id is last.
        let id = stdout.lines().last().map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(RuntimeError::Output("docker create printed no container id".into()));
        }
        Ok(WorkerId::new(id))
    }

    async fn start(&self, id: &WorkerId) -> Result<(), RuntimeError> {
        self.run(&["start".to_string(), id.to_string()]).await.map(|_| ())
    }

    async fn inspect(&self, id: &WorkerId) -> Result<NetworkSnapshot, RuntimeError> {
        let stdout = self
            .run(&[
                "inspect".to_string(),
                "--format".to_string(),
                NETWORK_SETTINGS_FORMAT.to_string(),
                id.to_string(),
            ])
            .await?;
        inspect::parse_network_settings(&stdout)
    }

    async fn remove(&self, id: &WorkerId) -> Result<(), RuntimeError> {
        self.run(&args::remove_args(id)).await.map(|_| ())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
