// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{NetworkSnapshot, PortSpec, PublishedPort};

/// Parse a TCP port, for tests that know their literals are valid.
pub fn tcp(port: u16) -> PortSpec {
    PortSpec::new(crate::Protocol::Tcp, port)
}

/// Snapshot of a worker whose ports are published on the host.
///
/// `ports` pairs each container port with its assigned host port.
pub fn published_snapshot(ports: &[(u16, &str)]) -> NetworkSnapshot {
    let mut snapshot = NetworkSnapshot::default();
    for (port, host_port) in ports {
        snapshot.ports.insert(
            tcp(*port),
            vec![PublishedPort { host_ip: "0.0.0.0".to_string(), host_port: host_port.to_string() }],
        );
    }
    snapshot
}

/// Snapshot of an unpublished worker attached to one named network.
pub fn internal_snapshot(network: &str, ip: &str, ports: &[u16]) -> NetworkSnapshot {
    let mut snapshot = NetworkSnapshot::default();
    for port in ports {
        snapshot.ports.insert(tcp(*port), Vec::new());
    }
    snapshot.networks.insert(network.to_string(), ip.to_string());
    snapshot
}
