// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reachable worker addresses, derived from the runtime's network report.
//!
//! Three topologies, checked in order:
//!
//! ```text
//! explicit IP      -> <ip>:<published host port>
//! in a container   -> <worker internal ip>:<declared port>
//! bare host        -> 127.0.0.1:<published host port>
//! ```

use crate::{Environment, PortPlan, PortSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Loopback address used when the orchestrator shares the worker's host.
pub const LOOPBACK: &str = "127.0.0.1";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("no host binding published for {0}")]
    MissingBinding(PortSpec),
    #[error("worker has no internal network address")]
    NoContainerAddress,
}

/// A host binding the runtime actually assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPort {
    pub host_ip: String,
    pub host_port: String,
}

/// Worker network state read right after start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    /// Every port the runtime knows about. Internal-only ports are present
    /// with an empty binding list.
    pub ports: HashMap<PortSpec, Vec<PublishedPort>>,
    /// Address on the runtime's default network, possibly empty.
    pub ip_address: String,
    /// Address per attached network name.
    pub networks: BTreeMap<String, String>,
}

impl NetworkSnapshot {
    /// Whether the runtime reports `port` at all.
    pub fn knows_port(&self, port: &PortSpec) -> bool {
        self.ports.contains_key(port)
    }

    /// Host port of the first binding for `port`.
    pub fn host_port(&self, port: &PortSpec) -> Option<&str> {
        self.ports
            .get(port)
            .and_then(|bindings| bindings.first())
            .map(|binding| binding.host_port.as_str())
            .filter(|host_port| !host_port.is_empty())
    }
}

/// Addresses in `host:port` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddresses {
    pub primary: String,
    /// Present only when the plan exposes VNC.
    pub vnc: Option<String>,
}

pub fn resolve_addresses(
    env: &Environment,
    plan: &PortPlan,
    snapshot: &NetworkSnapshot,
) -> Result<ResolvedAddresses, AddressError> {
    let address_of = |port: PortSpec| -> Result<String, AddressError> {
        if let Some(ip) = env.explicit_ip() {
            return published(ip, snapshot, port);
        }
        if env.in_docker {
            let ip = container_ip(&env.network, snapshot);
            if ip.is_empty() {
                return Err(AddressError::NoContainerAddress);
            }
            return Ok(join_host_port(&ip, &port.number.to_string()));
        }
        published(LOOPBACK, snapshot, port)
    };

    Ok(ResolvedAddresses {
        primary: address_of(plan.primary())?,
        vnc: plan.vnc().map(address_of).transpose()?,
    })
}

fn published(host: &str, snapshot: &NetworkSnapshot, port: PortSpec) -> Result<String, AddressError> {
    snapshot
        .host_port(&port)
        .map(|host_port| join_host_port(host, host_port))
        .ok_or(AddressError::MissingBinding(port))
}

/// The worker's internal address.
///
/// The default-network address wins when set. Otherwise the network named
/// `preferred` is used, then the first attached network (by name) that has
/// an address. Returns an empty string when no address is known.
pub fn container_ip(preferred: &str, snapshot: &NetworkSnapshot) -> String {
    if !snapshot.ip_address.is_empty() {
        return snapshot.ip_address.clone();
    }
    let mut candidates = snapshot.networks.iter().filter(|(_, ip)| !ip.is_empty());
    let first = candidates.clone().next();
    candidates
        .find(|(name, _)| name.as_str() == preferred)
        .or(first)
        .map(|(_, ip)| ip.clone())
        .unwrap_or_default()
}

/// `host:port`, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;
