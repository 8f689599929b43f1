// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the drover binary.

use std::path::Path;
use std::time::Duration;

use drover_adapters::probe::DEFAULT_POLL_INTERVAL;
use drover_core::{tolerant_bool, Environment, LogConfig};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Externally reachable IP override (`DROVER_IP`)
pub fn ip() -> Option<String> {
    var("DROVER_IP")
}

/// Whether drover itself runs in a container.
///
/// `DROVER_IN_DOCKER` when it parses as a boolean, otherwise the presence
/// of `/.dockerenv`.
pub fn in_docker() -> bool {
    var("DROVER_IN_DOCKER")
        .and_then(|s| tolerant_bool(&s))
        .unwrap_or_else(|| Path::new("/.dockerenv").exists())
}

/// Network workers join (`DROVER_NETWORK`, default `default`)
pub fn network() -> String {
    var("DROVER_NETWORK").unwrap_or_else(|| "default".to_string())
}

/// Readiness timeout (default 30s, configurable via `DROVER_STARTUP_TIMEOUT_MS`).
pub fn startup_timeout() -> Duration {
    var("DROVER_STARTUP_TIMEOUT_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}

/// Readiness poll interval (default 50ms, `DROVER_PROBE_INTERVAL_MS`)
pub fn probe_interval() -> Duration {
    var("DROVER_PROBE_INTERVAL_MS")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// Docker executable (`DROVER_DOCKER_BIN`, default `docker`)
pub fn docker_bin() -> String {
    var("DROVER_DOCKER_BIN").unwrap_or_else(|| "docker".to_string())
}

/// Worker memory ceiling in bytes (`DROVER_MEMORY`, e.g. `512m`)
pub fn memory() -> Result<Option<i64>, EnvError> {
    parsed("DROVER_MEMORY", parse_memory)
}

/// Worker CPU ceiling in nano-CPUs (`DROVER_CPU`, e.g. `1.5`)
pub fn nano_cpus() -> Result<Option<i64>, EnvError> {
    parsed("DROVER_CPU", parse_cpus)
}

/// Worker log driver (`DROVER_LOG_DRIVER`) with `DROVER_LOG_OPTS` as
/// comma-joined `key=value` options.
pub fn log_config() -> Result<Option<LogConfig>, EnvError> {
    let Some(driver) = var("DROVER_LOG_DRIVER") else {
        return Ok(None);
    };
    let options = var("DROVER_LOG_OPTS").unwrap_or_default();
    parse_log_config(&driver, &options)
        .map(Some)
        .ok_or(EnvError::Invalid { var: "DROVER_LOG_OPTS", value: options })
}

/// Deployment topology and worker limits from the process environment.
pub fn environment() -> Result<Environment, EnvError> {
    Ok(Environment {
        ip: ip(),
        in_docker: in_docker(),
        network: network(),
        memory: memory()?,
        nano_cpus: nano_cpus()?,
        log: log_config()?,
    })
}

fn parsed(
    name: &'static str,
    parse: fn(&str) -> Option<i64>,
) -> Result<Option<i64>, EnvError> {
    match var(name) {
        None => Ok(None),
        Some(value) => parse(&value).map(Some).ok_or(EnvError::Invalid { var: name, value }),
    }
}

/// Parse a human-readable size like `512m`, `2g` or `1.5gb` into bytes.
///
/// Units are binary (`k` = 1024) and case-insensitive; a bare number is bytes.
pub fn parse_memory(value: &str) -> Option<i64> {
    let lower = value.trim().to_ascii_lowercase();
    let digits_end = lower.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(lower.len());
    let (number, unit) = lower.split_at(digits_end);
    let number: f64 = number.parse().ok()?;
    let shift = match unit.trim() {
        "" | "b" => 0,
        "k" | "kb" => 10,
        "m" | "mb" => 20,
        "g" | "gb" => 30,
        "t" | "tb" => 40,
        _ => return None,
    };
    let bytes = number * (1u64 << shift) as f64;
    if !bytes.is_finite() || bytes <= 0.0 || bytes > i64::MAX as f64 {
        return None;
    }
    Some(bytes as i64)
}

/// Parse a decimal CPU count like `1.5` into nano-CPUs.
pub fn parse_cpus(value: &str) -> Option<i64> {
    let cpus: f64 = value.trim().parse().ok()?;
    let nano = (cpus * 1e9).round();
    if !nano.is_finite() || nano <= 0.0 || nano > i64::MAX as f64 {
        return None;
    }
    Some(nano as i64)
}

/// Build a log config from a driver and `key=value,key=value` options.
pub fn parse_log_config(driver: &str, options: &str) -> Option<LogConfig> {
    let mut config = LogConfig::new(driver);
    for pair in options.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=')?;
        if key.is_empty() {
            return None;
        }
        config = config.with_option(key, value);
    }
    Some(config)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
