//! Core functionality for actual scanning behaviour.
use crate::target::ScanTarget;
use log::debug;

use std::{collections::HashSet, sync::Arc, time::Duration};
use tokio::{
    io::{self, AsyncWriteExt},
    net::TcpStream,
    task::JoinSet,
    time,
};

/// Distinct error strings kept for the debug summary of a scan.
const MAX_DISTINCT_ERRORS: usize = 1000;

/// Everything a single probe task needs. Shared read-only between tasks.
#[derive(Debug)]
struct Connector {
    host: Arc<str>,
    timeout: Duration,
}

impl Connector {
    /// Probes one port and hands back the port number if it accepted a
    /// connection. The stream is shut down before returning.
    ///
    /// Ports that do not fit in a `u16` fail like any unreachable port.
    async fn probe(&self, port: u32) -> io::Result<u32> {
        let tcp_port = u16::try_from(port).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "port number out of range")
        })?;

        let tcp_stream = self.connect(tcp_port).await?;
        debug!(
            "Connection was successful, shutting down stream {}:{}",
            self.host, port
        );
        if let Err(e) = { tcp_stream }.shutdown().await {
            debug!("Shutdown stream error {}", &e);
        }

        Ok(port)
    }

    /// Resolves and connects with the configured timeout. Name resolution
    /// counts against the timeout as well.
    async fn connect(&self, port: u16) -> io::Result<TcpStream> {
        time::timeout(self.timeout, TcpStream::connect((&*self.host, port))).await?
    }
}

/// Runs one scan generation over `target`.
///
/// One task is spawned per entry in [`ScanTarget::ports`], duplicates
/// included, with no cap on how many are in flight. Results are recorded as
/// tasks finish; the target is marked scanned only after every task has
/// completed. Connection failures of any kind simply leave the port out of
/// [`ScanTarget::open_ports`], so this never fails.
///
/// Running many thousands of probes at once needs a matching open file
/// limit on the host.
///
/// ```rust,no_run
/// use portsweep::{scanner, target::ScanTarget};
///
/// # async fn run() {
/// let mut target = ScanTarget::new("scanme.nmap.org", (1..=1000).collect());
/// scanner::scan(&mut target).await;
/// println!("{:?}", target.open_ports());
/// # }
/// ```
pub async fn scan(target: &mut ScanTarget) {
    target.begin_scan();

    let connector = Arc::new(Connector {
        host: Arc::from(target.host()),
        timeout: target.timeout(),
    });

    debug!(
        "Start scanning {}\nTimeout {:?}\nNumber of ports {}",
        connector.host,
        connector.timeout,
        target.ports().len()
    );

    let mut probes = JoinSet::new();
    for &port in target.ports() {
        let connector = Arc::clone(&connector);
        probes.spawn(async move { connector.probe(port).await });
    }

    let mut errors: HashSet<String> = HashSet::new();
    let mut failed = 0_usize;
    while let Some(joined) = probes.join_next().await {
        let err = match joined {
            Ok(Ok(port)) => {
                target.record_open(port);
                continue;
            }
            Ok(Err(err)) => err.to_string(),
            Err(join_err) => join_err.to_string(),
        };
        failed += 1;
        if errors.len() < MAX_DISTINCT_ERRORS {
            errors.insert(err);
        }
    }

    target.finish_scan();

    debug!("{} probes failed, typical errors {:?}", failed, errors);
    debug!("Open ports found: {:?}", target.open_ports());
}
