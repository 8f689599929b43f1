// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw HTTP/1.1 readiness prober.

use super::{ProbeError, ReadinessProbe};
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::Instant;
use url::Url;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Polls a URL with plain GET requests until any HTTP response arrives.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    poll_interval: Duration,
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self { poll_interval: DEFAULT_POLL_INTERVAL }
    }
}

impl HttpProbe {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// Host, port and request target extracted from a probe URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub authority: String,
    pub host_header: String,
    pub request_path: String,
}

pub(crate) fn target(url: &Url) -> Result<Target, ProbeError> {
    let invalid = |reason: &str| ProbeError::InvalidUrl { url: url.clone(), reason: reason.to_string() };
    if url.scheme() != "http" {
        return Err(invalid("only http URLs can be probed"));
    }
    let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
    let port = url.port_or_known_default().ok_or_else(|| invalid("missing port"))?;
    let authority = format!("{}:{}", host, port);
    let mut request_path = url.path().to_string();
    if let Some(query) = url.query() {
        request_path.push('?');
        request_path.push_str(query);
    }
    Ok(Target { host_header: authority.clone(), authority, request_path })
}

/// One GET attempt. Succeeds when a status line starting with `HTTP/` is read.
async fn attempt(target: &Target) -> std::io::Result<bool> {
    let mut stream = TcpStream::connect(target.authority.as_str()).await?;
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
        target.request_path, target.host_header
    );
    stream.write_all(request.as_bytes()).await?;

    let mut reader = BufReader::new(stream);
    let mut status_line = String::new();
    reader.read_line(&mut status_line).await?;
    Ok(status_line.starts_with("HTTP/"))
}

#[async_trait]
impl ReadinessProbe for HttpProbe {
    async fn wait(&self, url: &Url, timeout: Duration) -> Result<(), ProbeError> {
        let target = target(url)?;
        let deadline = Instant::now() + timeout;
        let mut attempts = 0u32;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!(%url, attempts, "readiness deadline passed");
                return Err(ProbeError::Timeout { url: url.clone(), timeout });
            }
            attempts += 1;
            match tokio::time::timeout(remaining, attempt(&target)).await {
                Ok(Ok(true)) => {
                    tracing::debug!(%url, attempts, "service responded");
                    return Ok(());
                }
                Ok(Ok(false)) => tracing::trace!(%url, "non-HTTP response, retrying"),
                Ok(Err(e)) => tracing::trace!(%url, error = %e, "probe attempt failed"),
                Err(_) => {
                    return Err(ProbeError::Timeout { url: url.clone(), timeout });
                }
            }
            let pause = self.poll_interval.min(deadline.saturating_duration_since(Instant::now()));
            tokio::time::sleep(pause).await;
        }
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
