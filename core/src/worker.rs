//! # Host Addition Worker
//!
//! Single consumer for manual add requests. Submissions queue without
//! blocking and are processed strictly in arrival order, one at a time,
//! so at most one addition is ever in flight. Shutdown is cooperative:
//! the request already in flight runs to completion, but once the
//! session is cancelled its result is discarded instead of reported.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use tethr_common::config::{Config, ServiceErrorPolicy};
use tethr_common::network::address::HostAddress;
use tethr_common::network::subnet::InterfaceSource;
use tethr_common::outcome::{AddOutcome, AddReport};
use tethr_common::probing::ConnectivityProbe;
use tethr_common::registry::HostRegistry;

use crate::diagnosis;

/// Handle to the worker task. Constructing it starts the task; there is
/// no separate start step and no way to start it twice.
pub struct AddWorker {
    request_tx: UnboundedSender<String>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AddWorker {
    /// Spawns the consumer task. Reports flow out through `report_tx`,
    /// exactly one per submitted input, in submission order.
    pub fn spawn(
        config: Config,
        registry: Box<dyn HostRegistry>,
        probe: Box<dyn ConnectivityProbe>,
        interfaces: Box<dyn InterfaceSource>,
        report_tx: UnboundedSender<AddReport>,
    ) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<String>();
        let cancel: CancellationToken = CancellationToken::new();

        let worker = Worker {
            config,
            registry,
            probe,
            interfaces,
            report_tx,
            cancel: cancel.clone(),
        };
        let handle: JoinHandle<()> = tokio::spawn(worker.run(request_rx));

        Self {
            request_tx,
            cancel,
            handle,
        }
    }

    /// Queues raw user input for processing. Never blocks. Returns
    /// `false` when the worker has already stopped.
    pub fn submit(&self, raw_input: &str) -> bool {
        self.request_tx.send(raw_input.to_string()).is_ok()
    }

    /// Cancels the worker and waits for it to exit. The in-flight
    /// request (if any) finishes first; queued requests are dropped.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            warn!("host addition worker task failed: {e}");
        }
    }
}

struct Worker {
    config: Config,
    registry: Box<dyn HostRegistry>,
    probe: Box<dyn ConnectivityProbe>,
    interfaces: Box<dyn InterfaceSource>,
    report_tx: UnboundedSender<AddReport>,
    cancel: CancellationToken,
}

impl Worker {
    async fn run(self, mut request_rx: UnboundedReceiver<String>) {
        loop {
            // Biased so a pending cancel wins over a pending request.
            let raw_input: String = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                request = request_rx.recv() => match request {
                    Some(raw_input) => raw_input,
                    None => break,
                },
            };

            let report: AddReport = self.process(raw_input).await;

            // The addition above ran to completion either way; a
            // cancelled session just never hears about it.
            if self.cancel.is_cancelled() {
                break;
            }
            if self.report_tx.send(report).is_err() {
                debug!("report channel closed, stopping worker");
                break;
            }
        }

        debug!("host addition worker stopped");
    }

    async fn process(&self, raw_input: String) -> AddReport {
        let Some(address) = HostAddress::parse(&raw_input) else {
            debug!(input = %raw_input, "input does not name a host");
            return AddReport {
                input: raw_input,
                outcome: AddOutcome::InvalidInput,
            };
        };

        debug!(%address, "attempting to add host");
        let outcome: AddOutcome = match self.registry.add_host(&address).await {
            Ok(true) => AddOutcome::Success,
            Ok(false) => {
                diagnosis::diagnose_failure(
                    &address,
                    self.probe.as_ref(),
                    self.interfaces.as_ref(),
                    &self.config,
                )
                .await
            }
            Err(e) => {
                warn!(%address, "registration service failed: {e:#}");
                match self.config.error_policy {
                    ServiceErrorPolicy::TreatAsInvalidInput => AddOutcome::InvalidInput,
                    ServiceErrorPolicy::TreatAsGenericFailure => AddOutcome::GenericFailure,
                }
            }
        };

        AddReport {
            input: raw_input,
            outcome,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
