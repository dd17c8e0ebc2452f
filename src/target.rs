//! The scan target: what to probe and what was found.
use std::time::Duration;

/// Connect timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Where a [`ScanTarget`] is in its scan lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Never scanned, or refreshed since the last scan.
    #[default]
    Unscanned,
    /// Probes are in flight.
    Scanning,
    /// Every requested port received exactly one completed probe.
    Scanned,
}

/// A single host together with the ports to probe and the results of the
/// latest scan generation.
///
/// The host is not validated: a name that does not resolve simply makes
/// every probe fail. Ports are kept exactly as given, duplicates and order
/// included. Out of range values are accepted and never reported open.
///
/// ```rust
/// use std::time::Duration;
/// use portsweep::target::ScanTarget;
///
/// let target = ScanTarget::new("127.0.0.1", vec![22, 80, 443])
///     .with_timeout(Duration::from_millis(500));
///
/// assert!(!target.is_scanned());
/// assert!(target.open_ports().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    host: String,
    ports: Vec<u32>,
    timeout: Duration,
    open_ports: Vec<u32>,
    state: ScanState,
}

impl ScanTarget {
    /// Creates an unscanned target using [`DEFAULT_TIMEOUT`].
    pub fn new(host: impl Into<String>, ports: Vec<u32>) -> Self {
        Self {
            host: host.into(),
            ports,
            timeout: DEFAULT_TIMEOUT,
            open_ports: Vec::new(),
            state: ScanState::Unscanned,
        }
    }

    /// Sets the per-probe connect timeout.
    ///
    /// The timeout must be positive: with a zero timeout every probe expires
    /// before connecting and no port is ever reported open. Debug builds
    /// panic on zero; validating user input is up to the caller.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        debug_assert!(!timeout.is_zero(), "connect timeout must be positive");
        self.timeout = timeout;
        self
    }

    /// The host to connect to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The requested ports, as given at construction.
    #[must_use]
    pub fn ports(&self) -> &[u32] {
        &self.ports
    }

    /// The per-probe connect timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ports that accepted a connection, in the order they were recorded.
    ///
    /// Empty both before a scan and after a scan that found nothing; check
    /// [`is_scanned`](Self::is_scanned) to tell the two apart.
    #[must_use]
    pub fn open_ports(&self) -> &[u32] {
        &self.open_ports
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// `true` once a full scan generation has completed.
    #[must_use]
    pub fn is_scanned(&self) -> bool {
        self.state == ScanState::Scanned
    }

    /// Starts a new generation: previous results are dropped.
    pub(crate) fn begin_scan(&mut self) {
        self.open_ports.clear();
        self.state = ScanState::Scanning;
    }

    /// Records an open port. A port already recorded in this generation is
    /// not added twice.
    pub(crate) fn record_open(&mut self, port: u32) {
        debug_assert!(self.ports.contains(&port));
        if !self.open_ports.contains(&port) {
            self.open_ports.push(port);
        }
    }

    pub(crate) fn finish_scan(&mut self) {
        self.state = ScanState::Scanned;
    }

    /// Drops results and returns to [`ScanState::Unscanned`].
    pub(crate) fn reset(&mut self) {
        self.open_ports.clear();
        self.state = ScanState::Unscanned;
    }
}
