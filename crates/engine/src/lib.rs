// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drover-engine: provisions one worker per request and guarantees it is
//! removed again if any step after creation fails.

mod error;
mod handle;
mod manager;

pub use error::{Stage, StartError};
pub use handle::{Removal, StartedWorker};
pub use manager::{service_url, WorkerManager};
