// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker runtime settings derived from the image definition and the caps.
//!
//! Every function here is total. A bad time-zone request degrades to the
//! host zone with a diagnostic instead of failing the session.

use crate::{Browser, Caps, RequestId, ServiceBase, Transition, ZoneSource};

/// Shared memory given to workers whose image declares none (256 MiB).
pub const DEFAULT_SHM_SIZE: i64 = 268_435_456;

/// Hostname used when the caller does not override it.
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Runtime settings for one worker, ready to be placed in a container spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub env: Vec<String>,
    pub hostname: String,
    pub extra_hosts: Vec<String>,
    pub shm_size: i64,
    pub links: Vec<String>,
}

impl RuntimeConfig {
    pub fn build(base: &ServiceBase, caps: &Caps, zones: &dyn ZoneSource) -> Self {
        Self {
            env: env(base, caps, zones),
            hostname: hostname(caps),
            extra_hosts: extra_hosts(&base.service, caps),
            shm_size: shm_size(&base.service),
            links: base.links(),
        }
    }
}

/// The caller's zone if it is a known IANA name, otherwise the host zone.
pub fn time_zone(request_id: RequestId, caps: &Caps, zones: &dyn ZoneSource) -> String {
    if caps.time_zone.is_empty() {
        return zones.local();
    }
    match zones.lookup(&caps.time_zone) {
        Some(zone) => zone,
        None => {
            tracing::warn!(
                %request_id,
                state = %Transition::BadTimezone,
                time_zone = %caps.time_zone,
                "unknown time zone, using local zone"
            );
            zones.local()
        }
    }
}

/// `TZ`, `SCREEN_RESOLUTION` and `ENABLE_VNC`, then the image's own env.
///
/// Entries are not deduplicated; the runtime lets later ones win.
pub fn env(base: &ServiceBase, caps: &Caps, zones: &dyn ZoneSource) -> Vec<String> {
    let mut env = vec![
        format!("TZ={}", time_zone(base.request_id, caps, zones)),
        format!("SCREEN_RESOLUTION={}", caps.screen_resolution),
        format!("ENABLE_VNC={}", caps.vnc),
    ];
    env.extend(base.service.env.iter().cloned());
    env
}

pub fn shm_size(service: &Browser) -> i64 {
    if service.shm_size > 0 {
        service.shm_size
    } else {
        DEFAULT_SHM_SIZE
    }
}

pub fn hostname(caps: &Caps) -> String {
    if caps.container_hostname.is_empty() {
        DEFAULT_HOSTNAME.to_string()
    } else {
        caps.container_hostname.clone()
    }
}

/// Caller entries first, then the image's declared hosts.
pub fn extra_hosts(service: &Browser, caps: &Caps) -> Vec<String> {
    let mut hosts = caps.hosts_entries();
    hosts.extend(service.hosts.iter().cloned());
    hosts
}

#[cfg(test)]
#[path = "runtime_config_tests.rs"]
mod tests;
