// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle state tags attached to log events as the `state` field.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BadTimezone,
    CreatingContainer,
    StartingContainer,
    ContainerStarted,
    ServiceStarted,
    ProxyTo,
    RemoveContainer,
    ContainerRemoved,
    FailedToRemoveContainer,
}

crate::simple_display! {
    Transition {
        BadTimezone => "BAD_TIMEZONE",
        CreatingContainer => "CREATING_CONTAINER",
        StartingContainer => "STARTING_CONTAINER",
        ContainerStarted => "CONTAINER_STARTED",
        ServiceStarted => "SERVICE_STARTED",
        ProxyTo => "PROXY_TO",
        RemoveContainer => "REMOVE_CONTAINER",
        ContainerRemoved => "CONTAINER_REMOVED",
        FailedToRemoveContainer => "FAILED_TO_REMOVE_CONTAINER",
    }
}
