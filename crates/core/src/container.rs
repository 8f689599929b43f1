// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Container creation request handed to the runtime client.

use crate::{
    Environment, HostBinding, LogConfig, PortPlan, PortSpec, RuntimeConfig, ServiceBase,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the runtime needs to create one worker container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub image: String,
    pub hostname: String,
    pub env: Vec<String>,
    pub exposed_ports: Vec<PortSpec>,
    pub host: HostConfig,
}

/// Host-side settings for the container.
///
/// Auto-removal is never requested: the lifecycle manager removes workers
/// explicitly, so a stopped worker stays inspectable until then.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    pub binds: Vec<String>,
    pub port_bindings: Vec<(PortSpec, HostBinding)>,
    pub log: Option<LogConfig>,
    pub network_mode: String,
    pub tmpfs: BTreeMap<String, String>,
    pub shm_size: i64,
    pub privileged: bool,
    pub memory: Option<i64>,
    pub nano_cpus: Option<i64>,
    pub extra_hosts: Vec<String>,
    pub links: Vec<String>,
}

impl ContainerSpec {
    /// Assemble the creation request from the resolved plan and config.
    pub fn compose(
        base: &ServiceBase,
        env: &Environment,
        plan: &PortPlan,
        config: RuntimeConfig,
    ) -> Self {
        let service = &base.service;
        Self {
            image: service.image.clone(),
            hostname: config.hostname,
            env: config.env,
            exposed_ports: plan.exposed(),
            host: HostConfig {
                binds: service.volumes.clone(),
                port_bindings: plan.bindings(),
                log: env.log.clone(),
                network_mode: env.network.clone(),
                tmpfs: service.tmpfs.clone(),
                shm_size: config.shm_size,
                privileged: true,
                memory: env.memory,
                nano_cpus: env.nano_cpus,
                extra_hosts: config.extra_hosts,
                links: config.links,
            },
        }
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
