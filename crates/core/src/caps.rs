// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller-supplied capabilities for one worker request.

use serde::{Deserialize, Serialize};

/// Separator for list-valued capabilities (`hostsEntries`).
pub const LIST_SEPARATOR: char = ',';

/// Request attributes supplied by the session client.
///
/// Values arrive as strings and are interpreted permissively: a malformed
/// flag is treated as unset rather than rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Caps {
    /// Boolean-as-string; enables the VNC port when it parses as true.
    #[serde(rename = "enableVNC")]
    pub vnc: String,
    pub screen_resolution: String,
    /// IANA zone name; empty means "use the local zone".
    pub time_zone: String,
    pub container_hostname: String,
    /// Comma-joined `host:ip` pairs.
    pub hosts_entries: String,
}

impl Caps {
    /// Whether the caller asked for VNC. Unparseable values mean no.
    pub fn vnc_enabled(&self) -> bool {
        tolerant_bool(&self.vnc).unwrap_or(false)
    }

    /// Extra-host entries requested by the caller, in the order given.
    pub fn hosts_entries(&self) -> Vec<String> {
        split_list(&self.hosts_entries)
    }
}

/// Parse the boolean spellings session clients send for flags.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`. Returns
/// `None` for anything else so callers pick their own default instead of
/// failing the request.
pub fn tolerant_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split a comma-joined capability list. An empty string is an empty list.
pub(crate) fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(LIST_SEPARATOR).map(str::to_string).collect()
}

crate::builder! {
    pub struct CapsBuilder => Caps {
        into {
            vnc: String = "",
            screen_resolution: String = "1920x1080x24",
            time_zone: String = "",
            container_hostname: String = "",
            hosts_entries: String = "",
        }
    }
}

#[cfg(test)]
#[path = "caps_tests.rs"]
mod tests;
