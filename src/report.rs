//! Tabular rendering of scan results.
use std::fmt;

use crate::error::ReportError;
use crate::services::{self, UNKNOWN_SERVICE};
use crate::target::ScanTarget;

/// Status column of a report row. Only open ports are ever reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    /// The port completed a TCP handshake.
    Open,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
        }
    }
}

/// One line of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Port number.
    pub port: u32,
    /// Conventional service name, `None` when the port is not in the catalog.
    pub service: Option<&'static str>,
    /// Always [`PortStatus::Open`].
    pub status: PortStatus,
}

impl ReportRow {
    /// Service name for display, falling back to `unknown`.
    #[must_use]
    pub fn service_name(&self) -> &'static str {
        self.service.unwrap_or(UNKNOWN_SERVICE)
    }
}

/// Open ports of a scanned target, annotated with service names.
///
/// An empty report means the scan found nothing open; it never stands in for
/// "not scanned", which is an error from [`format`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    /// Rows in the order the engine recorded the ports.
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// `true` if no port was found open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ports Scanned:")?;
        writeln!(f, "{:<8}{:<16}Status", "Port", "Service")?;
        for row in &self.rows {
            writeln!(f, "{:<8}{:<16}{}", row.port, row.service_name(), row.status)?;
        }
        Ok(())
    }
}

/// Builds the report for `target`.
///
/// Fails with [`ReportError::NotScanned`] unless a scan generation has
/// completed, whatever the target's host or ports.
///
/// ```rust
/// use portsweep::{error::ReportError, report, target::ScanTarget};
///
/// let target = ScanTarget::new("127.0.0.1", vec![80]);
/// assert_eq!(report::format(&target), Err(ReportError::NotScanned));
/// ```
pub fn format(target: &ScanTarget) -> Result<Report, ReportError> {
    if !target.is_scanned() {
        return Err(ReportError::NotScanned);
    }

    let rows = target
        .open_ports()
        .iter()
        .map(|&port| ReportRow {
            port,
            service: services::lookup(port),
            status: PortStatus::Open,
        })
        .collect();

    Ok(Report { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned(ports: Vec<u32>, open: &[u32]) -> ScanTarget {
        let mut target = ScanTarget::new("127.0.0.1", ports);
        target.begin_scan();
        for &port in open {
            target.record_open(port);
        }
        target.finish_scan();
        target
    }

    #[test]
    fn unscanned_target_fails() {
        let target = ScanTarget::new("example.com", vec![22, 80]);
        assert_eq!(format(&target), Err(ReportError::NotScanned));

        let empty = ScanTarget::new("", vec![]);
        assert_eq!(format(&empty), Err(ReportError::NotScanned));
    }

    #[test]
    fn unknown_service_row() {
        let target = scanned(vec![7000, 7001, 7002], &[7000]);
        let report = format(&target).unwrap();

        assert_eq!(
            report.rows(),
            &[ReportRow {
                port: 7000,
                service: None,
                status: PortStatus::Open,
            }]
        );
        assert_eq!(report.rows()[0].service_name(), "unknown");
    }

    #[test]
    fn rows_follow_recorded_order() {
        let target = scanned(vec![22, 80, 443], &[443, 22]);
        let report = format(&target).unwrap();

        let ports: Vec<u32> = report.rows().iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![443, 22]);
        assert_eq!(report.rows()[0].service, Some("https"));
        assert_eq!(report.rows()[1].service, Some("ssh"));
    }

    #[test]
    fn scanned_with_nothing_open_is_empty_not_error() {
        let target = scanned(vec![1, 2, 3], &[]);
        let report = format(&target).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn renders_table() {
        let target = scanned(vec![22, 7000], &[22, 7000]);
        let rendered = format(&target).unwrap().to_string();

        assert_eq!(
            rendered,
            "Ports Scanned:\n\
             Port    Service         Status\n\
             22      ssh             open\n\
             7000    unknown         open\n"
        );
    }
}
