// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deployment topology and process-wide worker limits.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the orchestrator runs relative to its workers, plus the ceilings
/// applied to every worker it creates. Set once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Externally reachable address override. Forces host publication.
    pub ip: Option<String>,
    /// The orchestrator itself runs inside a container.
    pub in_docker: bool,
    /// Network the worker joins, and the one preferred when reading its
    /// internal address. Empty means the runtime default.
    pub network: String,
    /// Memory ceiling in bytes.
    pub memory: Option<i64>,
    /// CPU ceiling in billionths of a CPU.
    pub nano_cpus: Option<i64>,
    /// Log driver for worker containers; `None` keeps the runtime default.
    pub log: Option<LogConfig>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    crate::setters! {
        into {
            network: String,
        }
        set {
            in_docker: bool,
        }
        option {
            ip: String,
            log: LogConfig,
        }
    }

    /// Memory ceiling in bytes.
    pub fn memory(mut self, bytes: i64) -> Self {
        self.memory = Some(bytes);
        self
    }

    /// CPU ceiling in billionths of a CPU.
    pub fn nano_cpus(mut self, nano_cpus: i64) -> Self {
        self.nano_cpus = Some(nano_cpus);
        self
    }

    /// Explicit IP, with an empty override treated as unset.
    pub fn explicit_ip(&self) -> Option<&str> {
        self.ip.as_deref().filter(|ip| !ip.is_empty())
    }

    /// Whether exposed ports must be published on the host.
    ///
    /// Publication is skipped only when the orchestrator shares a container
    /// network with its workers and no external address was configured.
    pub fn publishes_ports(&self) -> bool {
        self.explicit_ip().is_some() || !self.in_docker
    }
}

/// Container log driver and its options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub driver: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl LogConfig {
    pub fn new(driver: impl Into<String>) -> Self {
        Self { driver: driver.into(), options: BTreeMap::new() }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}
