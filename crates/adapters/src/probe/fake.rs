// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted readiness probe for tests.

use super::{ProbeError, ReadinessProbe};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Recorded probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCall {
    pub url: Url,
    pub timeout: Duration,
}

struct FakeProbeState {
    calls: Vec<ProbeCall>,
    ready: bool,
    delay: Duration,
}

/// Fake probe that records calls and reports ready or timed out.
#[derive(Clone)]
pub struct FakeProbe {
    inner: Arc<Mutex<FakeProbeState>>,
}

impl Default for FakeProbe {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeProbeState {
                calls: Vec::new(),
                ready: true,
                delay: Duration::ZERO,
            })),
        }
    }
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Probe that never sees the service come up.
    pub fn never_ready() -> Self {
        let probe = Self::default();
        probe.inner.lock().ready = false;
        probe
    }

    /// Sleep this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.inner.lock().delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<ProbeCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl ReadinessProbe for FakeProbe {
    async fn wait(&self, url: &Url, timeout: Duration) -> Result<(), ProbeError> {
        let (ready, delay) = {
            let mut state = self.inner.lock();
            state.calls.push(ProbeCall { url: url.clone(), timeout });
            (state.ready, state.delay)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if ready {
            Ok(())
        } else {
            Err(ProbeError::Timeout { url: url.clone(), timeout })
        }
    }
}
