// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `docker create` / `docker rm` argument rendering.

use drover_core::{ContainerSpec, HostBinding, PortSpec, WorkerId};

const NANOS_PER_CPU: i64 = 1_000_000_000;

/// Arguments for `docker create`, image last.
pub(super) fn create_args(spec: &ContainerSpec) -> Vec<String> {
    let host = &spec.host;
    let mut args: Vec<String> = vec!["create".into(), "--hostname".into(), spec.hostname.clone()];

    for var in &spec.env {
        args.extend(["--env".into(), var.clone()]);
    }
    for port in &spec.exposed_ports {
        args.extend(["--expose".into(), port.to_string()]);
    }
    for (port, binding) in &host.port_bindings {
        args.extend(["--publish".into(), publish_arg(port, binding)]);
    }
    for bind in &host.binds {
        args.extend(["--volume".into(), bind.clone()]);
    }
    for (mount, options) in &host.tmpfs {
        let value =
            if options.is_empty() { mount.clone() } else { format!("{}:{}", mount, options) };
        args.extend(["--tmpfs".into(), value]);
    }
    if !host.network_mode.is_empty() {
        args.extend(["--network".into(), host.network_mode.clone()]);
    }
    if host.shm_size > 0 {
        args.extend(["--shm-size".into(), host.shm_size.to_string()]);
    }
    if host.privileged {
        args.push("--privileged".into());
    }
    if let Some(memory) = host.memory {
        args.extend(["--memory".into(), memory.to_string()]);
    }
    if let Some(nano_cpus) = host.nano_cpus {
        args.extend(["--cpus".into(), format_cpus(nano_cpus)]);
    }
    for entry in &host.extra_hosts {
        args.extend(["--add-host".into(), entry.clone()]);
    }
    for link in &host.links {
        args.extend(["--link".into(), link.clone()]);
    }
    if let Some(log) = &host.log {
        args.extend(["--log-driver".into(), log.driver.clone()]);
        for (key, value) in &log.options {
            args.extend(["--log-opt".into(), format!("{}={}", key, value)]);
        }
    }

    args.push(spec.image.clone());
    args
}

/// Arguments for removing a container and its anonymous volumes.
pub(super) fn remove_args(id: &WorkerId) -> Vec<String> {
    vec!["rm".into(), "--force".into(), "--volumes".into(), id.to_string()]
}

/// `ip:hostPort:containerPort/proto`; an empty host port asks for an ephemeral one.
fn publish_arg(port: &PortSpec, binding: &HostBinding) -> String {
    format!("{}:{}:{}", binding.host_ip, binding.host_port, port)
}

/// Render billionths of a CPU the way `--cpus` expects, e.g. `1.5`.
fn format_cpus(nano_cpus: i64) -> String {
    let whole = nano_cpus / NANOS_PER_CPU;
    let frac = nano_cpus % NANOS_PER_CPU;
    if frac == 0 {
        return whole.to_string();
    }
    let rendered = format!("{}.{:09}", whole, frac);
    rendered.trim_end_matches('0').to_string()
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
