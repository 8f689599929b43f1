// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-zone lookup, injected so the config builder stays free of host state.

/// Zone used when the host zone cannot be determined.
pub const FALLBACK_ZONE: &str = "UTC";

/// Source of IANA zone names.
pub trait ZoneSource: Send + Sync {
    /// Canonical name for `name`, or `None` if it is not a known zone.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Name of the zone the orchestrator host runs in.
    fn local(&self) -> String;
}

/// Zones from the compiled-in IANA database and the host's configured zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemZones;

impl ZoneSource for SystemZones {
    fn lookup(&self, name: &str) -> Option<String> {
        name.parse::<chrono_tz::Tz>().ok().map(|tz| tz.name().to_string())
    }

    fn local(&self) -> String {
        iana_time_zone::get_timezone().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "local time zone unavailable, using {}", FALLBACK_ZONE);
            FALLBACK_ZONE.to_string()
        })
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fixed {
    use super::ZoneSource;

    /// Zone source with a fixed local zone and an explicit list of known zones.
    #[derive(Debug, Clone)]
    pub struct FixedZones {
        local: String,
        known: Vec<String>,
    }

    impl FixedZones {
        pub fn new(local: impl Into<String>) -> Self {
            Self { local: local.into(), known: Vec::new() }
        }

        pub fn with_zone(mut self, name: impl Into<String>) -> Self {
            self.known.push(name.into());
            self
        }
    }

    impl ZoneSource for FixedZones {
        fn lookup(&self, name: &str) -> Option<String> {
            self.known.iter().find(|z| z.as_str() == name).cloned()
        }

        fn local(&self) -> String {
            self.local.clone()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fixed::FixedZones;

#[cfg(test)]
#[path = "timezone_tests.rs"]
mod tests;
