//! This crate exposes the internal functionality of the `portsweep` TCP
//! connect scanner so other tools can ask which ports of a host accept
//! connections.
//!
//! ## Architecture Overview
//!
//! Everything revolves around a [`ScanTarget`](crate::target::ScanTarget):
//!
//! 1. **Target**: host, ports and per-probe timeout, plus the results of the
//!    latest scan and whether that scan has completed
//! 2. **Scanning**: [`scanner::scan`] spawns one connection probe per port,
//!    waits for all of them and records the ports that answered
//! 3. **Reporting**: [`report::format`] annotates open ports with service
//!    names from [`services`], and refuses to report an unscanned target
//! 4. **Lifecycle**: [`lifecycle::run_and_report`] times a scan and its
//!    report, [`lifecycle::refresh`] resets a target for another scan
//!
//! Connection failures of any kind (refused, timed out, unresolvable host)
//! simply leave a port out of the results. The only reportable error in the
//! library is asking for a report before scanning.
//!
//! ## Basic Usage Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use portsweep::{lifecycle, target::ScanTarget};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut target = ScanTarget::new("127.0.0.1", (1..=1000).collect())
//!         .with_timeout(Duration::from_millis(500));
//!
//!     let summary = lifecycle::run_and_report(&mut target).await?;
//!     println!("{summary}");
//!
//!     // Scan again later with fresh results.
//!     lifecycle::refresh(&mut target, true).await;
//!     println!("{:?}", target.open_ports());
//!
//!     Ok(())
//! }
//! ```
//!
//! Probes are not pooled: a scan of N ports opens up to N sockets at once,
//! so keep port lists within the process's open file limit.
#![allow(clippy::needless_doctest_main)]
#![warn(missing_docs)]

pub mod tui;

pub mod error;

pub mod input;

pub mod services;

pub mod target;

pub mod scanner;

pub mod report;

pub mod lifecycle;
