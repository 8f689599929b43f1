// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsing of `docker inspect --format '{{json .NetworkSettings}}'`.

use crate::runtime::RuntimeError;
use drover_core::{NetworkSnapshot, PortSpec, PublishedPort};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct NetworkSettings {
    /// `null` bindings mean the port is exposed but not published.
    ports: Option<HashMap<String, Option<Vec<PortBinding>>>>,
    #[serde(rename = "IPAddress")]
    ip_address: String,
    networks: Option<HashMap<String, Option<Endpoint>>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct PortBinding {
    host_ip: String,
    host_port: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Endpoint {
    #[serde(rename = "IPAddress")]
    ip_address: String,
}

pub(super) fn parse_network_settings(json: &str) -> Result<NetworkSnapshot, RuntimeError> {
    let settings: NetworkSettings = serde_json::from_str(json)
        .map_err(|e| RuntimeError::Output(format!("network settings: {}", e)))?;

    let mut snapshot = NetworkSnapshot { ip_address: settings.ip_address, ..Default::default() };

    for (key, bindings) in settings.ports.unwrap_or_default() {
        let port = match key.parse::<PortSpec>() {
            Ok(port) => port,
            Err(e) => {
                tracing::debug!(%key, error = %e, "skipping unrecognised port key");
                continue;
            }
        };
        let published = bindings
            .unwrap_or_default()
            .into_iter()
            .map(|b| PublishedPort { host_ip: b.host_ip, host_port: b.host_port })
            .collect();
        snapshot.ports.insert(port, published);
    }

    for (name, endpoint) in settings.networks.unwrap_or_default() {
        snapshot.networks.insert(name, endpoint.map(|e| e.ip_address).unwrap_or_default());
    }

    Ok(snapshot)
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
