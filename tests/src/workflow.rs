#![cfg(test)]

use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::mpsc;

use tethr_common::config::{Config, ServiceErrorPolicy};
use tethr_common::network::subnet::InterfaceSource;
use tethr_common::outcome::{AddOutcome, AddReport};
use tethr_common::probing::{ConnectivityProbe, PortFlags};
use tethr_common::registry::HostRegistry;
use tethr_core::worker::AddWorker;

use crate::stubs::{
    CountingRegistry, FixedInterfaces, GatedRegistry, RegistryAnswer, StaticProbe, StaticRegistry,
    iface,
};

/// Interfaces that put 192.168.77.x targets on a directly reachable
/// subnet.
fn lan() -> FixedInterfaces {
    FixedInterfaces(vec![iface("eth0", 192, 168, 77, 1, 24)])
}

/// Interfaces with no route to 192.168.77.x.
fn off_lan() -> FixedInterfaces {
    FixedInterfaces(vec![iface("eth0", 10, 0, 0, 5, 8)])
}

async fn run_single(
    config: Config,
    registry: Box<dyn HostRegistry>,
    probe: Box<dyn ConnectivityProbe>,
    interfaces: Box<dyn InterfaceSource>,
    input: &str,
) -> AddReport {
    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<AddReport>();
    let worker: AddWorker = AddWorker::spawn(config, registry, probe, interfaces, report_tx);

    assert!(worker.submit(input), "running worker must accept submissions");
    let report: AddReport = report_rx.recv().await.expect("one report per submission");
    worker.shutdown().await;
    report
}

/*************************************************************
                      Queue discipline
**************************************************************/

#[tokio::test]
async fn worker_should_process_submissions_in_fifo_order() {
    let registry: CountingRegistry = CountingRegistry::new(Duration::from_millis(25));
    let seen = registry.seen.clone();
    let max_in_flight = registry.max_in_flight.clone();

    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<AddReport>();
    let worker: AddWorker = AddWorker::spawn(
        Config::default(),
        Box::new(registry),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(FixedInterfaces(Vec::new())),
        report_tx,
    );

    let inputs: [&str; 3] = ["10.0.0.1", "10.0.0.2", "10.0.0.3"];
    for input in inputs {
        assert!(worker.submit(input));
    }

    let mut reported: Vec<String> = Vec::new();
    for _ in 0..inputs.len() {
        let report: AddReport = report_rx.recv().await.expect("report per input");
        assert_eq!(report.outcome, AddOutcome::Success);
        reported.push(report.input);
    }
    worker.shutdown().await;

    assert_eq!(reported, inputs);
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["10.0.0.1:47989", "10.0.0.2:47989", "10.0.0.3:47989"]
    );
    assert_eq!(
        max_in_flight.load(Ordering::SeqCst),
        1,
        "additions must never overlap"
    );
}

#[tokio::test]
async fn shutdown_should_wait_for_the_in_flight_addition() {
    let registry: GatedRegistry = GatedRegistry::new();
    let entered = registry.entered.clone();
    let release = registry.release.clone();
    let completed = registry.completed.clone();

    let (report_tx, _report_rx) = mpsc::unbounded_channel::<AddReport>();
    let worker: AddWorker = AddWorker::spawn(
        Config::default(),
        Box::new(registry),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(FixedInterfaces(Vec::new())),
        report_tx,
    );

    assert!(worker.submit("10.0.0.1"));
    entered.notified().await;

    let shutdown_task = tokio::spawn(worker.shutdown());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(
        !shutdown_task.is_finished(),
        "shutdown must not return while an addition is in flight"
    );
    assert_eq!(completed.load(Ordering::SeqCst), 0);

    release.notify_one();
    shutdown_task.await.unwrap();
    assert_eq!(
        completed.load(Ordering::SeqCst),
        1,
        "the in-flight addition runs to completion"
    );
}

#[tokio::test]
async fn cancelled_worker_should_drop_queued_work_and_suppress_reports() {
    let registry: GatedRegistry = GatedRegistry::new();
    let entered = registry.entered.clone();
    let release = registry.release.clone();
    let completed = registry.completed.clone();

    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<AddReport>();
    let worker: AddWorker = AddWorker::spawn(
        Config::default(),
        Box::new(registry),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(FixedInterfaces(Vec::new())),
        report_tx,
    );

    assert!(worker.submit("10.0.0.1"));
    assert!(worker.submit("10.0.0.2"));
    entered.notified().await;

    let shutdown_task = tokio::spawn(worker.shutdown());
    tokio::time::sleep(Duration::from_millis(50)).await;
    release.notify_one();
    shutdown_task.await.unwrap();

    assert_eq!(
        completed.load(Ordering::SeqCst),
        1,
        "only the in-flight addition finishes; the queued one is dropped"
    );
    assert_eq!(
        report_rx.recv().await,
        None,
        "a cancelled session receives no reports"
    );
}

/*************************************************************
                   Outcome classification
**************************************************************/

#[tokio::test]
async fn unparseable_input_should_classify_as_invalid() {
    let registry: CountingRegistry = CountingRegistry::new(Duration::ZERO);
    let seen = registry.seen.clone();

    let report: AddReport = run_single(
        Config::default(),
        Box::new(registry),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(FixedInterfaces(Vec::new())),
        "not a host!!",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::InvalidInput);
    assert_eq!(report.input, "not a host!!");
    assert!(
        seen.lock().unwrap().is_empty(),
        "unparseable input never reaches the registry"
    );
}

#[tokio::test]
async fn accepted_host_should_classify_as_success() {
    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Accept,
        }),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(lan()),
        "192.168.77.5:47990",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::Success);
    assert_eq!(report.input, "192.168.77.5:47990");
}

#[tokio::test]
async fn rejected_off_subnet_private_host_should_classify_as_wrong_subnet() {
    let probe: StaticProbe = StaticProbe::new(PortFlags::TCP_47984);
    let last_interest = probe.last_interest.clone();

    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Reject,
        }),
        Box::new(probe),
        Box::new(off_lan()),
        "192.168.77.5",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::WrongSubnet);
    assert!(
        last_interest.lock().unwrap().is_none(),
        "wrong-subnet failures skip the port probe"
    );
}

#[tokio::test]
async fn rejected_host_should_classify_as_wrong_subnet_when_local_address_is_public() {
    // The only interface address is public yet shares every compared
    // /12 bit with the private target; it must not stand in for a
    // private route.
    let probe: StaticProbe = StaticProbe::new(PortFlags::TCP_47984);
    let last_interest = probe.last_interest.clone();

    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Reject,
        }),
        Box::new(probe),
        Box::new(FixedInterfaces(vec![iface("eth0", 172, 32, 5, 1, 12)])),
        "172.16.9.9",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::WrongSubnet);
    assert!(
        last_interest.lock().unwrap().is_none(),
        "a public local address must not vouch for a private target"
    );
}

#[tokio::test]
async fn rejected_host_should_classify_as_blocked_when_handshake_ports_fail() {
    let probe: StaticProbe = StaticProbe::new(PortFlags::TCP_47984);
    let last_interest = probe.last_interest.clone();

    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Reject,
        }),
        Box::new(probe),
        Box::new(lan()),
        "192.168.77.5",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::BlockedPorts(PortFlags::TCP_47984));
    assert_eq!(
        *last_interest.lock().unwrap(),
        Some(PortFlags::TCP_47984 | PortFlags::TCP_47989),
        "diagnosis probes exactly the handshake ports"
    );
}

#[tokio::test]
async fn rejected_host_should_classify_as_generic_when_probe_is_clean() {
    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Reject,
        }),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(lan()),
        "192.168.77.5",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::GenericFailure);
}

#[tokio::test]
async fn rejected_host_should_classify_as_generic_when_probe_is_inconclusive() {
    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Reject,
        }),
        Box::new(StaticProbe::new(PortFlags::INCONCLUSIVE)),
        Box::new(lan()),
        "192.168.77.5",
    )
    .await;

    assert_eq!(report.outcome, AddOutcome::GenericFailure);
}

#[tokio::test]
async fn service_error_should_follow_the_configured_policy() {
    let report: AddReport = run_single(
        Config::default(),
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Fail,
        }),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(lan()),
        "192.168.77.5",
    )
    .await;
    assert_eq!(
        report.outcome,
        AddOutcome::InvalidInput,
        "the default policy folds service errors into invalid input"
    );

    let strict: Config = Config {
        error_policy: ServiceErrorPolicy::TreatAsGenericFailure,
        ..Config::default()
    };
    let report: AddReport = run_single(
        strict,
        Box::new(StaticRegistry {
            answer: RegistryAnswer::Fail,
        }),
        Box::new(StaticProbe::new(PortFlags::NONE)),
        Box::new(lan()),
        "192.168.77.5",
    )
    .await;
    assert_eq!(report.outcome, AddOutcome::GenericFailure);
}
