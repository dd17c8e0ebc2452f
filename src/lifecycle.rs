//! Timed scan-and-report runs, and resetting targets for another scan.
use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::info;

use crate::error::ReportError;
use crate::report::{self, Report};
use crate::scanner;
use crate::target::ScanTarget;

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

/// Outcome of [`run_and_report`].
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Open ports found by the scan.
    pub report: Report,
    /// Wall clock time the scan started.
    pub started: DateTime<Local>,
    /// Wall clock time the report was ready.
    pub ended: DateTime<Local>,
    /// Monotonic time taken by scan and report together.
    pub elapsed: Duration,
    /// Number of entries in the target's port list, duplicates included.
    pub ports_scanned: usize,
}

/// The line announcing a scan that started at `started`.
#[must_use]
pub fn starting_line(started: &DateTime<Local>) -> String {
    format!("Starting scan at {}", started.format(TIMESTAMP_FORMAT))
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report)?;
        writeln!(f, "Scan ended at {}", self.ended.format(TIMESTAMP_FORMAT))?;
        write!(f, "Scanned {} ports in {:?}", self.ports_scanned, self.elapsed)
    }
}

/// Scans `target`, then builds its report, timing the whole run.
///
/// The report cannot be missing after a scan on this path, but the error is
/// still propagated rather than assumed away.
///
/// ```rust,no_run
/// use portsweep::{lifecycle, target::ScanTarget};
///
/// # async fn run() -> Result<(), portsweep::error::ReportError> {
/// let mut target = ScanTarget::new("127.0.0.1", (1..=1024).collect());
/// let summary = lifecycle::run_and_report(&mut target).await?;
/// println!("{summary}");
/// # Ok(())
/// # }
/// ```
pub async fn run_and_report(target: &mut ScanTarget) -> Result<ScanSummary, ReportError> {
    run_and_report_with(target, |_| {}).await
}

/// Like [`run_and_report`], calling `on_start` with the start time before
/// any probe is sent, so callers can announce a scan while it runs.
pub async fn run_and_report_with<F>(
    target: &mut ScanTarget,
    on_start: F,
) -> Result<ScanSummary, ReportError>
where
    F: FnOnce(&DateTime<Local>),
{
    let started = Local::now();
    on_start(&started);
    let timer = Instant::now();

    scanner::scan(target).await;
    let report = report::format(target)?;

    let elapsed = timer.elapsed();
    let ended = Local::now();
    info!(
        "Scanned {} ports on {} in {:?}, {} open",
        target.ports().len(),
        target.host(),
        elapsed,
        report.rows().len()
    );

    Ok(ScanSummary {
        report,
        started,
        ended,
        elapsed,
        ports_scanned: target.ports().len(),
    })
}

/// Clears the results of `target` and marks it unscanned. With `rerun` set,
/// a new scan generation runs straight away.
pub async fn refresh(target: &mut ScanTarget, rerun: bool) {
    target.reset();
    if rerun {
        scanner::scan(target).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::ScanState;
    use tokio::net::TcpListener;

    const TIMEOUT: Duration = Duration::from_secs(1);

    async fn listener() -> (TcpListener, u32) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = u32::from(listener.local_addr().unwrap().port());
        (listener, port)
    }

    #[tokio::test]
    async fn run_and_report_summarises_scan() {
        let (_listener, open) = listener().await;
        let closed = {
            let (_l, port) = listener().await;
            port
        };

        let mut target = ScanTarget::new("127.0.0.1", vec![open, closed]).with_timeout(TIMEOUT);
        let summary = run_and_report(&mut target).await.unwrap();

        assert!(target.is_scanned());
        assert_eq!(summary.ports_scanned, 2);
        assert_eq!(summary.report.rows().len(), 1);
        assert_eq!(summary.report.rows()[0].port, open);
        assert!(summary.ended >= summary.started);

        let rendered = summary.to_string();
        assert!(rendered.starts_with("Ports Scanned:"));
        assert!(!rendered.contains("Starting scan at "));
        assert!(rendered.contains("Scan ended at "));
        assert!(rendered.contains("Scanned 2 ports in "));
    }

    #[tokio::test]
    async fn start_callback_runs_before_scanning() {
        let (_listener, open) = listener().await;
        let mut target = ScanTarget::new("127.0.0.1", vec![open]).with_timeout(TIMEOUT);

        let mut seen = None;
        let summary = run_and_report_with(&mut target, |started| {
            seen = Some((*started, starting_line(started)));
        })
        .await
        .unwrap();

        let (started, line) = seen.unwrap();
        assert_eq!(started, summary.started);
        assert!(line.starts_with("Starting scan at "));
        assert_eq!(line.len(), "Starting scan at DD-MM-YYYY HH:MM:SS".len());
    }

    #[tokio::test]
    async fn refresh_without_rerun_resets() {
        let (_listener, open) = listener().await;
        let mut target = ScanTarget::new("127.0.0.1", vec![open]).with_timeout(TIMEOUT);
        run_and_report(&mut target).await.unwrap();
        assert_eq!(target.open_ports(), &[open]);

        refresh(&mut target, false).await;

        assert_eq!(target.state(), ScanState::Unscanned);
        assert!(target.open_ports().is_empty());
        assert_eq!(report::format(&target), Err(ReportError::NotScanned));
    }

    #[tokio::test]
    async fn refresh_with_rerun_matches_reset_then_scan() {
        let (_listener, open) = listener().await;
        let ports = vec![open, open];

        let mut rerun = ScanTarget::new("127.0.0.1", ports.clone()).with_timeout(TIMEOUT);
        scanner::scan(&mut rerun).await;
        refresh(&mut rerun, true).await;

        let mut manual = ScanTarget::new("127.0.0.1", ports).with_timeout(TIMEOUT);
        scanner::scan(&mut manual).await;
        refresh(&mut manual, false).await;
        scanner::scan(&mut manual).await;

        assert_eq!(rerun, manual);
        assert!(rerun.is_scanned());
        assert_eq!(rerun.open_ports(), &[open]);
    }

    #[tokio::test]
    async fn refresh_on_unscanned_target_is_harmless() {
        let mut target = ScanTarget::new("127.0.0.1", vec![]);
        refresh(&mut target, false).await;
        assert_eq!(target.state(), ScanState::Unscanned);

        refresh(&mut target, true).await;
        assert!(target.is_scanned());
    }
}
