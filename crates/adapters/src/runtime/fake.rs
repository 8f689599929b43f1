// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory runtime for tests.

use super::{RuntimeClient, RuntimeError};
use async_trait::async_trait;
use drover_core::{ContainerSpec, NetworkSnapshot, WorkerId};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Runtime operation, used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeStage {
    Create,
    Start,
    Inspect,
    Remove,
}

/// Recorded runtime call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Create(Box<ContainerSpec>),
    Start(WorkerId),
    Inspect(WorkerId),
    Remove(WorkerId),
}

struct FakeRuntimeState {
    calls: Vec<RuntimeCall>,
    failures: Vec<RuntimeStage>,
    snapshot: NetworkSnapshot,
    containers: BTreeSet<WorkerId>,
    running: BTreeSet<WorkerId>,
    next_id: u64,
}

/// Fake runtime that records calls and tracks container existence.
#[derive(Clone)]
pub struct FakeRuntime {
    inner: Arc<Mutex<FakeRuntimeState>>,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRuntimeState {
                calls: Vec::new(),
                failures: Vec::new(),
                snapshot: NetworkSnapshot::default(),
                containers: BTreeSet::new(),
                running: BTreeSet::new(),
                next_id: 1,
            })),
        }
    }
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot returned by every successful `inspect`.
    pub fn with_snapshot(self, snapshot: NetworkSnapshot) -> Self {
        self.inner.lock().snapshot = snapshot;
        self
    }

    /// Make every call at `stage` fail.
    pub fn fail_at(self, stage: RuntimeStage) -> Self {
        self.inner.lock().failures.push(stage);
        self
    }

    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.inner.lock().calls.clone()
    }

    /// Ids passed to `remove`, in call order.
    pub fn removals(&self) -> Vec<WorkerId> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RuntimeCall::Remove(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    /// Spec of the most recent `create`.
    pub fn last_created(&self) -> Option<ContainerSpec> {
        self.inner.lock().calls.iter().rev().find_map(|call| match call {
            RuntimeCall::Create(spec) => Some((**spec).clone()),
            _ => None,
        })
    }

    /// Containers that exist (created and not removed).
    pub fn containers(&self) -> Vec<WorkerId> {
        self.inner.lock().containers.iter().cloned().collect()
    }

    /// Containers that were started and not removed.
    pub fn running(&self) -> Vec<WorkerId> {
        self.inner.lock().running.iter().cloned().collect()
    }
}

fn injected(stage: RuntimeStage) -> RuntimeError {
    RuntimeError::Other(format!("injected {:?} failure", stage))
}

#[async_trait]
impl RuntimeClient for FakeRuntime {
    async fn create(&self, spec: &ContainerSpec) -> Result<WorkerId, RuntimeError> {
        let mut state = self.inner.lock();
        state.calls.push(RuntimeCall::Create(Box::new(spec.clone())));
        if state.failures.contains(&RuntimeStage::Create) {
            return Err(injected(RuntimeStage::Create));
        }
        let id = WorkerId::new(format!("fake-{:04}", state.next_id));
        state.next_id += 1;
        state.containers.insert(id.clone());
        Ok(id)
    }

    async fn start(&self, id: &WorkerId) -> Result<(), RuntimeError> {
        let mut state = self.inner.lock();
        state.calls.push(RuntimeCall::Start(id.clone()));
        if state.failures.contains(&RuntimeStage::Start) {
            return Err(injected(RuntimeStage::Start));
        }
        if !state.containers.contains(id) {
            return Err(RuntimeError::Other(format!("no such container: {}", id)));
        }
        state.running.insert(id.clone());
        Ok(())
    }

    async fn inspect(&self, id: &WorkerId) -> Result<NetworkSnapshot, RuntimeError> {
        let mut state = self.inner.lock();
        state.calls.push(RuntimeCall::Inspect(id.clone()));
        if state.failures.contains(&RuntimeStage::Inspect) {
            return Err(injected(RuntimeStage::Inspect));
        }
        Ok(state.snapshot.clone())
    }

    async fn remove(&self, id: &WorkerId) -> Result<(), RuntimeError> {
        let mut state = self.inner.lock();
        state.calls.push(RuntimeCall::Remove(id.clone()));
        if state.failures.contains(&RuntimeStage::Remove) {
            return Err(injected(RuntimeStage::Remove));
        }
        if !state.containers.remove(id) {
            return Err(RuntimeError::Other(format!("no such container: {}", id)));
        }
        state.running.remove(id);
        Ok(())
    }
}
