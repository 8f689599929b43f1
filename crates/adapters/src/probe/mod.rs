// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness probing for freshly started workers.

mod http;

pub use http::{HttpProbe, DEFAULT_POLL_INTERVAL};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProbe, ProbeCall};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors from readiness probing
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{url} not ready after {}ms", timeout.as_millis())]
    Timeout { url: Url, timeout: Duration },
    #[error("cannot probe {url}: {reason}")]
    InvalidUrl { url: Url, reason: String },
    #[error("{0}")]
    Other(String),
}

/// Waits until a service answers at a URL.
#[async_trait]
pub trait ReadinessProbe: Send + Sync + 'static {
    /// Returns once `url` responds, or `ProbeError::Timeout` after `timeout`.
    async fn wait(&self, url: &Url, timeout: Duration) -> Result<(), ProbeError>;
}
