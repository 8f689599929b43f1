// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::Stage;
use drover_adapters::{FakeProbe, FakeRuntime, RuntimeCall, RuntimeStage};
use drover_core::test_support::{internal_snapshot, published_snapshot, tcp};
use drover_core::{Browser, FixedZones, HostBinding, NetworkSnapshot, RequestId};
use std::time::Duration;

struct Harness {
    runtime: FakeRuntime,
    probe: FakeProbe,
    manager: WorkerManager,
}

fn harness(runtime: FakeRuntime, probe: FakeProbe, environment: Environment) -> Harness {
    let zones = FixedZones::new("Europe/Berlin").with_zone("America/New_York");
    let manager = WorkerManager::new(
        Arc::new(runtime.clone()),
        Arc::new(probe.clone()),
        Arc::new(zones),
        environment,
    );
    Harness { runtime, probe, manager }
}

fn base() -> ServiceBase {
    ServiceBase::new(
        RequestId(42),
        Browser::builder().image("browsers/chrome:100").port("4444").vnc("5900").build(),
    )
}

fn vnc_caps() -> Caps {
    Caps::builder().vnc("true").build()
}

fn bare_host_snapshot() -> NetworkSnapshot {
    published_snapshot(&[(4444, "49213"), (5900, "49214")])
}

#[tokio::test]
async fn bare_host_worker_with_vnc() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());

    let worker = h.manager.start_worker(&base(), &vnc_caps()).await.unwrap();

    assert_eq!(worker.address.as_str(), "http://127.0.0.1:49213/");
    assert_eq!(worker.vnc_address.as_deref(), Some("127.0.0.1:49214"));
    assert_eq!(worker.worker_id, "fake-0001");

    let spec = h.runtime.last_created().unwrap();
    assert_eq!(spec.image, "browsers/chrome:100");
    assert_eq!(spec.exposed_ports, vec![tcp(4444), tcp(5900)]);
    assert_eq!(
        spec.host.port_bindings,
        vec![(tcp(4444), HostBinding::ephemeral()), (tcp(5900), HostBinding::ephemeral())]
    );
    assert!(spec.host.privileged);
    assert_eq!(spec.host.shm_size, 268_435_456);
    assert!(spec.env.contains(&"ENABLE_VNC=true".to_string()));
    assert!(spec.env.contains(&"TZ=Europe/Berlin".to_string()));

    let calls = h.probe.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].url.as_str(), "http://127.0.0.1:49213/");
    assert_eq!(calls[0].timeout, Duration::from_secs(30));

    assert_eq!(h.runtime.running(), vec![worker.worker_id.clone()]);
    assert!(h.runtime.removals().is_empty());
}

#[tokio::test]
async fn call_order_is_create_start_inspect() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());

    h.manager.start_worker(&base(), &Caps::default()).await.unwrap();

    let calls = h.runtime.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], RuntimeCall::Create(_)));
    assert!(matches!(calls[1], RuntimeCall::Start(_)));
    assert!(matches!(calls[2], RuntimeCall::Inspect(_)));
}

#[tokio::test]
async fn vnc_disabled_omits_vnc_port_and_address() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());

    let worker = h.manager.start_worker(&base(), &Caps::builder().vnc("yes").build()).await.unwrap();

    assert_eq!(worker.vnc_address, None);
    assert_eq!(h.runtime.last_created().unwrap().exposed_ports, vec![tcp(4444)]);
}

#[tokio::test]
async fn in_container_worker_uses_internal_address() {
    let snapshot = internal_snapshot("grid", "172.17.0.5", &[4444, 5900]);
    let env = Environment::new().in_docker(true).network("grid");
    let h = harness(FakeRuntime::new().with_snapshot(snapshot), FakeProbe::new(), env);

    let worker = h.manager.start_worker(&base(), &vnc_caps()).await.unwrap();

    assert_eq!(worker.address.as_str(), "http://172.17.0.5:4444/");
    assert_eq!(worker.vnc_address.as_deref(), Some("172.17.0.5:5900"));
    let spec = h.runtime.last_created().unwrap();
    assert!(spec.host.port_bindings.is_empty());
    assert_eq!(spec.host.network_mode, "grid");
}

#[tokio::test]
async fn explicit_ip_wins_inside_a_container() {
    let env = Environment::new().in_docker(true).ip("203.0.113.5");
    let snapshot = published_snapshot(&[(4444, "32768")]);
    let h = harness(FakeRuntime::new().with_snapshot(snapshot), FakeProbe::new(), env);

    let worker = h.manager.start_worker(&base(), &Caps::default()).await.unwrap();

    assert_eq!(worker.address.as_str(), "http://203.0.113.5:32768/");
    assert_eq!(h.runtime.last_created().unwrap().host.port_bindings.len(), 1);
}

#[tokio::test]
async fn service_path_is_appended() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());
    let mut base = base();
    base.service.path = "/wd/hub".into();

    let worker = h.manager.start_worker(&base, &Caps::default()).await.unwrap();

    assert_eq!(worker.address.as_str(), "http://127.0.0.1:49213/wd/hub");
    assert_eq!(h.probe.calls()[0].url, worker.address);
}

#[tokio::test]
async fn bad_port_creates_nothing() {
    let h = harness(FakeRuntime::new(), FakeProbe::new(), Environment::new());
    let mut base = base();
    base.service.port = "http".into();

    let err = h.manager.start_worker(&base, &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Config);
    assert!(h.runtime.calls().is_empty());
}

#[tokio::test]
async fn bad_vnc_port_only_matters_when_vnc_is_requested() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());
    let mut base = base();
    base.service.vnc = String::new();

    h.manager.start_worker(&base, &Caps::default()).await.unwrap();
    let err = h.manager.start_worker(&base, &vnc_caps()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Config);
}

#[tokio::test]
async fn create_failure_needs_no_rollback() {
    let h = harness(FakeRuntime::new().fail_at(RuntimeStage::Create), FakeProbe::new(), Environment::new());

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Create);
    assert_eq!(err.worker_id(), None);
    assert!(h.runtime.removals().is_empty());
}

async fn assert_rolled_back_once(stage: RuntimeStage, expected: Stage) {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()).fail_at(stage),
        FakeProbe::new(),
        Environment::new(),
    );

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), expected);
    let id = err.worker_id().cloned().unwrap();
    assert_eq!(h.runtime.removals(), vec![id]);
    assert!(h.runtime.containers().is_empty());
    assert!(h.runtime.running().is_empty());
}

#[tokio::test]
async fn start_failure_rolls_back_once() {
    assert_rolled_back_once(RuntimeStage::Start, Stage::Start).await;
}

#[tokio::test]
async fn inspect_failure_rolls_back_once() {
    assert_rolled_back_once(RuntimeStage::Inspect, Stage::Inspect).await;
}

#[tokio::test]
async fn missing_primary_port_rolls_back() {
    let h = harness(FakeRuntime::new().with_snapshot(NetworkSnapshot::default()), FakeProbe::new(), Environment::new());

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert!(matches!(err, StartError::Binding { port, .. } if port == tcp(4444)));
    assert_eq!(h.runtime.removals().len(), 1);
    assert!(h.probe.calls().is_empty());
}

#[tokio::test]
async fn unpublished_port_rolls_back() {
    // Port known to the runtime but never bound on the host.
    let snapshot = internal_snapshot("bridge", "172.17.0.5", &[4444]);
    let h = harness(FakeRuntime::new().with_snapshot(snapshot), FakeProbe::new(), Environment::new());

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert!(matches!(err, StartError::Address { .. }));
    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn missing_internal_address_rolls_back() {
    let snapshot = internal_snapshot("grid", "", &[4444]);
    let env = Environment::new().in_docker(true).network("grid");
    let h = harness(FakeRuntime::new().with_snapshot(snapshot), FakeProbe::new(), env);

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Binding);
    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn readiness_timeout_rolls_back() {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()),
        FakeProbe::never_ready(),
        Environment::new(),
    );

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Readiness);
    assert_eq!(h.runtime.removals(), vec![WorkerId::new("fake-0001")]);
    assert!(h.runtime.running().is_empty());
}

#[tokio::test]
async fn slow_probe_is_cut_off_at_startup_timeout() {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()),
        FakeProbe::new().with_delay(Duration::from_secs(30)),
        Environment::new(),
    );
    let base = base().startup_timeout(Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = h.manager.start_worker(&base, &Caps::default()).await.unwrap_err();

    assert!(matches!(err, StartError::Readiness { source: ProbeError::Timeout { .. }, .. }));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn removal_failure_keeps_original_error() {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()).fail_at(RuntimeStage::Start).fail_at(RuntimeStage::Remove),
        FakeProbe::new(),
        Environment::new(),
    );

    let err = h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Start);
    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn abandoned_start_removes_the_container() {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()),
        FakeProbe::new().with_delay(Duration::from_secs(10)),
        Environment::new(),
    );

    let outcome =
        tokio::time::timeout(Duration::from_millis(100), h.manager.start_worker(&base(), &Caps::default())).await;
    assert!(outcome.is_err());
    h.manager.finish_rollbacks().await;

    assert_eq!(h.runtime.removals(), vec![WorkerId::new("fake-0001")]);
    assert!(h.runtime.containers().is_empty());
    assert!(h.runtime.running().is_empty());
}

#[tokio::test]
async fn started_worker_is_not_removed_until_cancelled() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());

    let worker = h.manager.start_worker(&base(), &Caps::default()).await.unwrap();
    h.manager.finish_rollbacks().await;

    assert!(h.runtime.removals().is_empty());
    assert_eq!(h.runtime.running(), vec![worker.worker_id.clone()]);
}

#[tokio::test]
async fn failed_start_does_not_schedule_a_second_removal() {
    let h = harness(
        FakeRuntime::new().with_snapshot(bare_host_snapshot()),
        FakeProbe::never_ready(),
        Environment::new(),
    );

    h.manager.start_worker(&base(), &Caps::default()).await.unwrap_err();
    h.manager.finish_rollbacks().await;

    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());
    let worker = h.manager.start_worker(&base(), &Caps::default()).await.unwrap();

    worker.cancel().await;
    worker.cancel().await;

    assert_eq!(h.runtime.removals(), vec![worker.worker_id.clone()]);
    assert!(h.runtime.containers().is_empty());
}

#[tokio::test]
async fn concurrent_cancel_removes_once() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());
    let worker = h.manager.start_worker(&base(), &Caps::default()).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let canceller = worker.canceller();
            tokio::spawn(async move { canceller.run().await })
        })
        .collect();
    let mut fired = 0;
    for handle in handles {
        if handle.await.unwrap() {
            fired += 1;
        }
    }

    assert_eq!(fired, 1);
    assert_eq!(h.runtime.removals().len(), 1);
}

#[tokio::test]
async fn concurrent_requests_get_distinct_workers() {
    let h = harness(FakeRuntime::new().with_snapshot(bare_host_snapshot()), FakeProbe::new(), Environment::new());
    let (a, b) = (base(), base());
    let caps = Caps::default();

    let (first, second) = tokio::join!(h.manager.start_worker(&a, &caps), h.manager.start_worker(&b, &caps));

    assert_ne!(first.unwrap().worker_id, second.unwrap().worker_id);
    assert_eq!(h.runtime.running().len(), 2);
}

#[yare::parameterized(
    empty   = { "", "http://10.0.0.1:4444/" },
    root    = { "/", "http://10.0.0.1:4444/" },
    hub     = { "/wd/hub", "http://10.0.0.1:4444/wd/hub" },
    bare    = { "wd/hub", "http://10.0.0.1:4444/wd/hub" },
)]
fn service_url_joins_path(path: &str, expected: &str) {
    assert_eq!(service_url("10.0.0.1:4444", path).unwrap().as_str(), expected);
}

#[test]
fn service_url_keeps_ipv6_brackets() {
    assert_eq!(service_url("[::1]:4444", "/").unwrap().as_str(), "http://[::1]:4444/");
}

#[test]
fn elapsed_ms_counts_from_the_given_instant() {
    let since = Instant::now() - Duration::from_millis(1500);
    let ms = elapsed_ms(since);
    assert!((1500..60_000).contains(&ms));
}
