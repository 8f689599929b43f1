// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-adapters: the container runtime and readiness probe seams, with
//! their production implementations and test fakes.

pub mod probe;
pub mod runtime;

pub use probe::{HttpProbe, ProbeError, ReadinessProbe};
pub use runtime::{DockerCli, RuntimeClient, RuntimeError};

#[cfg(any(test, feature = "test-support"))]
pub use probe::{FakeProbe, ProbeCall};
#[cfg(any(test, feature = "test-support"))]
pub use runtime::{FakeRuntime, RuntimeCall, RuntimeStage};
