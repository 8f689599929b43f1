// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drover start`: provision one worker and hold it until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use drover_adapters::{DockerCli, HttpProbe};
use drover_core::{Caps, Catalog, RequestId, ServiceBase, SystemZones};
use drover_engine::{StartedWorker, WorkerManager};
use serde::Serialize;

use crate::env;
use crate::output::{self, OutputFormat};

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Catalog JSON file
    pub catalog: PathBuf,
    /// Browser name from the catalog
    pub browser: String,
    /// Version or version prefix (default: the catalog default)
    #[arg(long)]
    pub version: Option<String>,
    /// Expose the VNC port
    #[arg(long)]
    pub vnc: bool,
    #[arg(long, default_value = "1920x1080x24")]
    pub screen_resolution: String,
    /// IANA zone name (default: this host's zone)
    #[arg(long)]
    pub time_zone: Option<String>,
    /// Container hostname (default: localhost)
    #[arg(long)]
    pub hostname: Option<String>,
    /// Comma-joined host:ip entries added before the image's own
    #[arg(long)]
    pub hosts_entries: Option<String>,
    /// Comma-joined names of containers to link
    #[arg(long)]
    pub application_containers: Option<String>,
}

impl StartArgs {
    pub fn caps(&self) -> Caps {
        Caps {
            vnc: if self.vnc { "true".to_string() } else { String::new() },
            screen_resolution: self.screen_resolution.clone(),
            time_zone: self.time_zone.clone().unwrap_or_default(),
            container_hostname: self.hostname.clone().unwrap_or_default(),
            hosts_entries: self.hosts_entries.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Started {
    pub browser: String,
    pub version: String,
    pub worker_id: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vnc_address: Option<String>,
}

impl Started {
    fn new(browser: &str, version: &str, worker: &StartedWorker) -> Self {
        Self {
            browser: browser.to_string(),
            version: version.to_string(),
            worker_id: worker.worker_id.to_string(),
            address: worker.address.to_string(),
            vnc_address: worker.vnc_address.clone(),
        }
    }
}

fn render(started: &Started) -> String {
    let mut out = format!(
        "{} {} ready at {} ({})",
        started.browser, started.version, started.address, started.worker_id
    );
    if let Some(vnc) = &started.vnc_address {
        out.push_str(&format!("\nVNC at {}", vnc));
    }
    out.push_str("\nPress Ctrl-C to remove the worker");
    out
}

pub async fn handle(args: StartArgs, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("loading {}", args.catalog.display()))?;
    let wanted = args.version.as_deref().unwrap_or("");
    let (version, browser) = catalog
        .find(&args.browser, wanted)
        .with_context(|| format!("no browser {:?} version {:?} in catalog", args.browser, wanted))?;

    let environment = env::environment()?;
    let manager = WorkerManager::new(
        Arc::new(DockerCli::new(env::docker_bin())),
        Arc::new(HttpProbe::new(env::probe_interval())),
        Arc::new(SystemZones),
        environment,
    );

    let base = ServiceBase::new(RequestId(u64::from(std::process::id())), browser.clone())
        .application_containers(args.application_containers.clone().unwrap_or_default())
        .startup_timeout(env::startup_timeout());
    let caps = args.caps();

    let mut start = Box::pin(manager.start_worker(&base, &caps));
    let started = tokio::select! {
        started = &mut start => Some(started),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };
    drop(start);
    let Some(started) = started else {
        manager.finish_rollbacks().await;
        bail!("interrupted before the worker became ready");
    };
    let worker = started?;

    output::print(format, &Started::new(&args.browser, version, &worker), render)?;

    let interrupted = tokio::signal::ctrl_c().await;
    worker.cancel().await;
    interrupted.context("waiting for Ctrl-C")?;
    Ok(())
}

#[cfg(test)]
#[path = "start_tests.rs"]
mod tests;
