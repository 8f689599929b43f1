// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Protocol + number port identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("invalid port number: {0:?}")]
    InvalidNumber(String),
    #[error("invalid protocol: {0:?}")]
    InvalidProtocol(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

crate::simple_display! {
    Protocol {
        Tcp => "tcp",
        Udp => "udp",
    }
}

impl FromStr for Protocol {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(PortError::InvalidProtocol(other.to_string())),
        }
    }
}

/// A container port, rendered the way the runtime keys it: `4444/tcp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortSpec {
    pub number: u16,
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn new(protocol: Protocol, number: u16) -> Self {
        Self { number, protocol }
    }

    /// Parse a declared port as TCP.
    ///
    /// Accepts a bare number (`"4444"`) or a number with a protocol suffix
    /// (`"4444/tcp"`). Zero and out-of-range values are rejected.
    pub fn tcp(declared: &str) -> Result<Self, PortError> {
        match declared.split_once('/') {
            Some(_) => declared.parse(),
            None => Ok(Self::new(Protocol::Tcp, parse_number(declared)?)),
        }
    }
}

fn parse_number(s: &str) -> Result<u16, PortError> {
    match s.parse::<u16>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PortError::InvalidNumber(s.to_string())),
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, protocol) = s.split_once('/').unwrap_or((s, "tcp"));
        Ok(Self::new(protocol.parse()?, parse_number(number)?))
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.protocol)
    }
}

impl Serialize for PortSpec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PortSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "port_tests.rs"]
mod tests;
