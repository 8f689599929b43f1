// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker image definitions and the per-request service envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Correlation token carried on every log line of one request.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// One browser image as declared in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Browser {
    pub image: String,
    /// Primary service port, e.g. `"4444"`.
    pub port: String,
    /// VNC port, only exposed when the caller enables VNC.
    pub vnc: String,
    /// URL path prefix for the readiness probe and the returned address.
    pub path: String,
    /// Bind mounts in `src:dst[:opts]` form.
    pub volumes: Vec<String>,
    /// Mount point to tmpfs options.
    pub tmpfs: BTreeMap<String, String>,
    /// Base environment in `KEY=value` form.
    pub env: Vec<String>,
    /// Base extra hosts in `host:ip` form.
    pub hosts: Vec<String>,
    /// Shared memory in bytes; 0 selects the default.
    pub shm_size: i64,
}

crate::builder! {
    pub struct BrowserBuilder => Browser {
        into {
            image: String = "browsers/chrome:100",
            port: String = "4444",
            vnc: String = "5900",
            path: String = "/",
        }
        set {
            volumes: Vec<String> = Vec::new(),
            tmpfs: BTreeMap<String, String> = BTreeMap::new(),
            env: Vec<String> = Vec::new(),
            hosts: Vec<String> = Vec::new(),
            shm_size: i64 = 0,
        }
    }
}

/// Everything fixed about a single provisioning request.
#[derive(Debug, Clone)]
pub struct ServiceBase {
    pub request_id: RequestId,
    pub service: Browser,
    /// Comma-joined peer container names to link; empty for none.
    pub application_containers: String,
    pub startup_timeout: Duration,
}

impl ServiceBase {
    pub fn new(request_id: RequestId, service: Browser) -> Self {
        Self {
            request_id,
            service,
            application_containers: String::new(),
            startup_timeout: Duration::from_secs(30),
        }
    }

    crate::setters! {
        into {
            application_containers: String,
        }
        set {
            startup_timeout: Duration,
        }
    }

    /// Peer containers to link, in declaration order.
    pub fn links(&self) -> Vec<String> {
        crate::caps::split_list(&self.application_containers)
    }
}
