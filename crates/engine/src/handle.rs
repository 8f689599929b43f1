// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The handle returned for a running worker and its one-shot removal.

use drover_adapters::RuntimeClient;
use drover_core::{RequestId, Transition, WorkerId};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Forced removal of one worker, performed at most once.
///
/// Clones share the same guard, so the rollback path and every copy held
/// by callers together issue a single `remove` call.
#[derive(Clone)]
pub struct Removal {
    runtime: Arc<dyn RuntimeClient>,
    worker_id: WorkerId,
    request_id: RequestId,
    fired: Arc<AtomicBool>,
}

impl Removal {
    pub(crate) fn new(runtime: Arc<dyn RuntimeClient>, worker_id: WorkerId, request_id: RequestId) -> Self {
        Self { runtime, worker_id, request_id, fired: Arc::new(AtomicBool::new(false)) }
    }

    pub fn worker_id(&self) -> &WorkerId {
        &self.worker_id
    }

    /// Whether removal has already been requested.
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }

    /// Remove the worker. Returns `false` if an earlier call already did.
    ///
    /// Runtime failures are logged and swallowed.
    pub async fn run(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            tracing::debug!(
                request_id = %self.request_id,
                worker_id = %self.worker_id,
                "removal already requested"
            );
            return false;
        }

        tracing::info!(
            request_id = %self.request_id,
            worker_id = %self.worker_id,
            state = %Transition::RemoveContainer,
            "removing container"
        );
        match self.runtime.remove(&self.worker_id).await {
            Ok(()) => tracing::info!(
                request_id = %self.request_id,
                worker_id = %self.worker_id,
                state = %Transition::ContainerRemoved,
                "container removed"
            ),
            Err(e) => tracing::error!(
                request_id = %self.request_id,
                worker_id = %self.worker_id,
                state = %Transition::FailedToRemoveContainer,
                error = %e,
                "failed to remove container"
            ),
        }
        true
    }
}

impl fmt::Debug for Removal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Removal")
            .field("worker_id", &self.worker_id)
            .field("request_id", &self.request_id)
            .field("fired", &self.is_fired())
            .finish()
    }
}

/// Removal tasks spawned by rollback guards that were dropped while armed.
#[derive(Clone, Default)]
pub(crate) struct PendingRollbacks {
    tasks: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl PendingRollbacks {
    fn push(&self, task: JoinHandle<()>) {
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(task);
    }

    /// Await every task pushed so far.
    pub(crate) async fn join(&self) {
        let tasks = std::mem::take(&mut *self.tasks.lock());
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "rollback task did not complete");
            }
        }
    }
}

/// Removes the worker on drop unless disarmed.
///
/// Armed right after creation so that an abandoned start (caller timeout,
/// dropped request) still releases the container.
pub(crate) struct RollbackGuard {
    removal: Option<Removal>,
    pending: PendingRollbacks,
}

impl RollbackGuard {
    pub(crate) fn arm(removal: Removal, pending: PendingRollbacks) -> Self {
        Self { removal: Some(removal), pending }
    }

    /// The worker is handed to the caller; keep it running.
    pub(crate) fn disarm(mut self) {
        self.removal = None;
    }
}

impl Drop for RollbackGuard {
    fn drop(&mut self) {
        let Some(removal) = self.removal.take() else {
            return;
        };
        if removal.is_fired() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(
                    request_id = %removal.request_id,
                    worker_id = %removal.worker_id,
                    "worker start abandoned, removing container"
                );
                let task = handle.spawn(async move {
                    removal.run().await;
                });
                self.pending.push(task);
            }
            Err(e) => tracing::error!(
                request_id = %removal.request_id,
                worker_id = %removal.worker_id,
                error = %e,
                "worker start abandoned outside a runtime, container left behind"
            ),
        }
    }
}

/// A worker that passed its readiness check.
#[derive(Debug)]
pub struct StartedWorker {
    /// Primary service URL, including the service path.
    pub address: Url,
    pub worker_id: WorkerId,
    /// `host:port` of the VNC server when VNC was requested.
    pub vnc_address: Option<String>,
    removal: Removal,
}

impl StartedWorker {
    pub(crate) fn new(address: Url, vnc_address: Option<String>, removal: Removal) -> Self {
        Self { address, worker_id: removal.worker_id().clone(), vnc_address, removal }
    }

    /// Remove the worker. Safe to call more than once.
    pub async fn cancel(&self) {
        self.removal.run().await;
    }

    /// A detached copy of the cancellation capability.
    pub fn canceller(&self) -> Removal {
        self.removal.clone()
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
