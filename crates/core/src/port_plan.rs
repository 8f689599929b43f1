// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which worker ports are exposed, and whether they are published on the host.

use crate::{Browser, Caps, Environment, PortError, PortSpec};
use serde::{Deserialize, Serialize};

/// Host interface every published port binds to.
pub const PUBLISH_HOST_IP: &str = "0.0.0.0";

/// Ports the worker exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Exposure {
    Primary(PortSpec),
    WithVnc { primary: PortSpec, vnc: PortSpec },
}

/// Whether exposed ports get a host binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Publication {
    /// Publish each exposed port on [`PUBLISH_HOST_IP`] with an ephemeral host port.
    Host,
    /// No host binding; the worker is reached on its internal address.
    Internal,
}

/// A requested host binding. An empty `host_port` asks for an ephemeral one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostBinding {
    pub host_ip: String,
    pub host_port: String,
}

impl HostBinding {
    pub fn ephemeral() -> Self {
        Self { host_ip: PUBLISH_HOST_IP.to_string(), host_port: String::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortPlan {
    pub exposure: Exposure,
    pub publication: Publication,
}

impl PortPlan {
    /// Derive the plan for one request.
    ///
    /// The primary port is always exposed. The VNC port is added only when
    /// the caller's flag parses as true, and only then is it validated.
    pub fn resolve(service: &Browser, caps: &Caps, env: &Environment) -> Result<Self, PortError> {
        let primary = PortSpec::tcp(&service.port)?;
        let exposure = if caps.vnc_enabled() {
            Exposure::WithVnc { primary, vnc: PortSpec::tcp(&service.vnc)? }
        } else {
            Exposure::Primary(primary)
        };
        let publication =
            if env.publishes_ports() { Publication::Host } else { Publication::Internal };
        Ok(Self { exposure, publication })
    }

    pub fn primary(&self) -> PortSpec {
        match self.exposure {
            Exposure::Primary(primary) | Exposure::WithVnc { primary, .. } => primary,
        }
    }

    pub fn vnc(&self) -> Option<PortSpec> {
        match self.exposure {
            Exposure::Primary(_) => None,
            Exposure::WithVnc { vnc, .. } => Some(vnc),
        }
    }

    /// Ports to expose, primary first.
    pub fn exposed(&self) -> Vec<PortSpec> {
        match self.exposure {
            Exposure::Primary(primary) => vec![primary],
            Exposure::WithVnc { primary, vnc } => vec![primary, vnc],
        }
    }

    /// Host bindings to request, empty for internal-only plans.
    pub fn bindings(&self) -> Vec<(PortSpec, HostBinding)> {
        match self.publication {
            Publication::Internal => Vec::new(),
            Publication::Host => {
                self.exposed().into_iter().map(|port| (port, HostBinding::ephemeral())).collect()
            }
        }
    }
}

#[cfg(test)]
#[path = "port_plan_tests.rs"]
mod tests;
