// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-core: worker model, port planning, runtime configuration and
//! address resolution for ephemeral browser workers.
//!
//! Everything in this crate is pure: no I/O, no runtime calls. The engine
//! crate drives these pieces in order and owns the side effects.

pub mod macros;

pub mod caps;
pub mod catalog;
pub mod container;
pub mod environment;
pub mod network;
pub mod port;
pub mod port_plan;
pub mod runtime_config;
pub mod service;
pub mod timezone;
pub mod transition;
pub mod worker;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use caps::{tolerant_bool, Caps};
#[cfg(any(test, feature = "test-support"))]
pub use caps::CapsBuilder;
pub use catalog::{BrowserVersions, Catalog, CatalogError};
pub use container::{ContainerSpec, HostConfig};
pub use environment::{Environment, LogConfig};
pub use network::{
    container_ip, join_host_port, resolve_addresses, AddressError, NetworkSnapshot,
    PublishedPort, ResolvedAddresses,
};
pub use port::{PortError, PortSpec, Protocol};
pub use port_plan::{Exposure, HostBinding, PortPlan, Publication};
pub use runtime_config::{RuntimeConfig, DEFAULT_HOSTNAME, DEFAULT_SHM_SIZE};
#[cfg(any(test, feature = "test-support"))]
pub use service::BrowserBuilder;
pub use service::{Browser, RequestId, ServiceBase};
#[cfg(any(test, feature = "test-support"))]
pub use timezone::FixedZones;
pub use timezone::{SystemZones, ZoneSource};
pub use transition::Transition;
pub use worker::WorkerId;
