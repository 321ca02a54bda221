use std::time::Instant;

use indicatif::ProgressBar;
use tokio::sync::mpsc;
use tracing::warn;

use tethr_common::config::{Config, ServiceErrorPolicy};
use tethr_common::network::subnet::LiveInterfaces;
use tethr_common::outcome::AddReport;
use tethr_core::probe::TcpConnectProbe;
use tethr_core::registry::ControlPortRegistry;
use tethr_core::worker::AddWorker;

use crate::terminal::{print, spinner};

pub async fn add(
    hosts: Vec<String>,
    server: Option<String>,
    strict_errors: bool,
) -> anyhow::Result<()> {
    let inputs: Vec<String> = hosts
        .iter()
        .map(|host| host.trim().to_string())
        .filter(|host| {
            if host.is_empty() {
                warn!("Ignoring empty host input");
            }
            !host.is_empty()
        })
        .collect();

    if inputs.is_empty() {
        anyhow::bail!("enter at least one host address");
    }

    let mut config: Config = Config::default();
    if let Some(server) = server {
        config.test_server = server;
    }
    if strict_errors {
        config.error_policy = ServiceErrorPolicy::TreatAsGenericFailure;
    }

    print::header("adding hosts");

    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<AddReport>();
    let worker: AddWorker = AddWorker::spawn(
        config,
        Box::new(ControlPortRegistry::new()),
        Box::new(TcpConnectProbe::new()),
        Box::new(LiveInterfaces),
        report_tx,
    );

    for input in &inputs {
        worker.submit(input);
    }

    let start_time: Instant = Instant::now();
    let progress: ProgressBar = spinner::start("Contacting hosts...");

    let mut reports: Vec<AddReport> = Vec::with_capacity(inputs.len());
    while reports.len() < inputs.len() {
        match report_rx.recv().await {
            Some(report) => {
                progress.set_message(format!(
                    "{} of {} hosts processed",
                    reports.len() + 1,
                    inputs.len()
                ));
                reports.push(report);
            }
            None => break,
        }
    }

    progress.finish_and_clear();
    worker.shutdown().await;

    for report in &reports {
        print::report_line(report);
    }

    let failed: usize = reports
        .iter()
        .filter(|report| !report.outcome.is_success())
        .count();
    print::add_summary(reports.len() - failed, reports.len(), start_time.elapsed());

    if failed > 0 {
        anyhow::bail!("{failed} of {} hosts could not be added", reports.len());
    }
    Ok(())
}
