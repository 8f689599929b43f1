// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker lifecycle: create, start, inspect, wait, or roll back.

use crate::handle::{PendingRollbacks, Removal, RollbackGuard, StartedWorker};
use crate::StartError;
use drover_adapters::{ProbeError, ReadinessProbe, RuntimeClient};
use drover_core::{
    resolve_addresses, Caps, ContainerSpec, Environment, PortPlan, RuntimeConfig, ServiceBase,
    Transition, WorkerId, ZoneSource,
};
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Provisions workers against one runtime under one deployment topology.
///
/// Holds no per-request state, so a single manager can serve concurrent
/// requests.
pub struct WorkerManager {
    runtime: Arc<dyn RuntimeClient>,
    probe: Arc<dyn ReadinessProbe>,
    zones: Arc<dyn ZoneSource>,
    environment: Environment,
    pending: PendingRollbacks,
}

impl WorkerManager {
    pub fn new(
        runtime: Arc<dyn RuntimeClient>,
        probe: Arc<dyn ReadinessProbe>,
        zones: Arc<dyn ZoneSource>,
        environment: Environment,
    ) -> Self {
        Self { runtime, probe, zones, environment, pending: PendingRollbacks::default() }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Start a worker and wait until it answers.
    ///
    /// Once the container exists, any failure removes it before the error
    /// is returned. Dropping the future before it completes schedules the
    /// removal on the runtime instead; see [`Self::finish_rollbacks`].
    pub async fn start_worker(&self, base: &ServiceBase, caps: &Caps) -> Result<StartedWorker, StartError> {
        let request_id = base.request_id;
        let image = &base.service.image;

        let plan = PortPlan::resolve(&base.service, caps, &self.environment)?;
        let config = RuntimeConfig::build(base, caps, self.zones.as_ref());
        let spec = ContainerSpec::compose(base, &self.environment, &plan, config);

        tracing::info!(%request_id, %image, state = %Transition::CreatingContainer, "creating container");
        let id = self.runtime.create(&spec).await.map_err(StartError::Create)?;

        let removal = Removal::new(Arc::clone(&self.runtime), id.clone(), request_id);
        let guard = RollbackGuard::arm(removal.clone(), self.pending.clone());
        match self.start_inner(base, &plan, &id).await {
            Ok((address, vnc_address)) => {
                guard.disarm();
                Ok(StartedWorker::new(address, vnc_address, removal))
            }
            Err(e) => {
                tracing::warn!(
                    %request_id,
                    worker_id = %id,
                    stage = %e.stage(),
                    error = %e,
                    "worker start failed, rolling back"
                );
                removal.run().await;
                Err(e)
            }
        }
    }

    /// Wait for removals scheduled by abandoned `start_worker` calls.
    pub async fn finish_rollbacks(&self) {
        self.pending.join().await;
    }

    /// Steps after creation; the caller rolls back on `Err`.
    async fn start_inner(
        &self,
        base: &ServiceBase,
        plan: &PortPlan,
        id: &WorkerId,
    ) -> Result<(Url, Option<String>), StartError> {
        let request_id = base.request_id;
        let image = &base.service.image;

        tracing::info!(%request_id, %image, worker_id = %id, state = %Transition::StartingContainer, "starting container");
        let started_at = Instant::now();
        self.runtime
            .start(id)
            .await
            .map_err(|source| StartError::Start { id: id.clone(), source })?;

        let snapshot = self
            .runtime
            .inspect(id)
            .await
            .map_err(|source| StartError::Inspect { id: id.clone(), source })?;
        let primary = plan.primary();
        if !snapshot.knows_port(&primary) {
            return Err(StartError::Binding { id: id.clone(), port: primary });
        }
        tracing::info!(
            %request_id,
            %image,
            worker_id = %id,
            state = %Transition::ContainerStarted,
            elapsed_ms = elapsed_ms(started_at),
            "container started"
        );

        let addresses = resolve_addresses(&self.environment, plan, &snapshot)
            .map_err(|source| StartError::Address { id: id.clone(), source })?;
        let url = service_url(&addresses.primary, &base.service.path)
            .map_err(|source| StartError::Url { id: id.clone(), source })?;

        let waiting_since = Instant::now();
        let timeout = base.startup_timeout;
        let ready = match tokio::time::timeout(timeout, self.probe.wait(&url, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout { url: url.clone(), timeout }),
        };
        ready.map_err(|source| StartError::Readiness { id: id.clone(), source })?;
        tracing::info!(
            %request_id,
            %image,
            worker_id = %id,
            state = %Transition::ServiceStarted,
            elapsed_ms = elapsed_ms(waiting_since),
            "service started"
        );
        tracing::info!(%request_id, state = %Transition::ProxyTo, address = %url, "proxying to worker");

        Ok((url, addresses.vnc))
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// `http://<address><path>`, with an empty path meaning `/`.
pub fn service_url(address: &str, path: &str) -> Result<Url, url::ParseError> {
    let path = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
    Url::parse(&format!("http://{}{}", address, path))
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
