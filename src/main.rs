#![deny(clippy::all)]
#![warn(clippy::pedantic)]

use portsweep::input::{Opts, PortSpecKind, ScanPlan};
use portsweep::lifecycle;
use portsweep::tui::banner;
use portsweep::{detail, output, warning};

use log::debug;
use std::fmt::Display;
use std::process;

/// Parses the command line and configuration file, scans every requested
/// port at once and prints the open ones.
#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() {
    env_logger::init();

    let mut opts: Opts = Opts::read();
    let config = opts.load_config().unwrap_or_else(|e| fail(&e, opts.accessible));
    opts.merge(&config);

    debug!("Main() `opts` arguments are {:?}", opts);

    if opts.accessible {
        colored::control::set_override(false);
    }
    if !opts.no_banner {
        println!("{}", banner(opts.accessible));
    }

    let plan = opts.resolve().unwrap_or_else(|e| fail(&e, opts.accessible));
    detail!("Parameters parsed", opts.accessible);
    announce_ports(&plan, opts.accessible);

    #[cfg(unix)]
    check_ulimit(&opts, plan.ports.len());

    let mut target = plan.target();
    let run = lifecycle::run_and_report_with(&mut target, |started| {
        println!("{}", lifecycle::starting_line(started));
    });
    match run.await {
        Ok(summary) => {
            if summary.report.is_empty() {
                output!(format!("No open ports found on {}", plan.host), opts.accessible);
            }
            println!("{summary}");
        }
        Err(e) => fail(&e, opts.accessible),
    }
}

fn fail(error: &impl Display, accessible: bool) -> ! {
    warning!(error, accessible);
    process::exit(1);
}

fn announce_ports(plan: &ScanPlan, accessible: bool) {
    match plan.kind {
        PortSpecKind::Range => {
            detail!(format!("Scanning ports in the range {}", plan.spec), accessible);
        }
        PortSpecKind::List => {
            detail!(format!("The ports to be scanned are {:?}", plan.ports), accessible);
        }
    }
}

/// Raises the open file limit when asked to, and warns when it is too low
/// for every probe to hold a socket at the same time.
#[cfg(unix)]
fn check_ulimit(opts: &Opts, sockets: usize) {
    use rlimit::Resource;

    if let Some(limit) = opts.ulimit {
        if Resource::NOFILE.set(limit, limit).is_ok() {
            detail!(
                format!("Automatically increasing ulimit value to {limit}."),
                opts.accessible
            );
        } else {
            warning!("ERROR. Failed to set ulimit value.", opts.accessible);
        }
    }

    let soft = match Resource::NOFILE.get() {
        Ok((soft, _)) => soft,
        Err(e) => {
            debug!("Could not read the open file limit: {}", e);
            return;
        }
    };
    debug!("Open file limit is {}", soft);

    if u64::try_from(sockets).unwrap_or(u64::MAX) > soft {
        warning!(
            format!(
                "File limit {soft} is lower than the {sockets} ports to scan, some probes may fail.\nUse -u to raise it, e.g. -u {}.",
                sockets.saturating_add(100)
            ),
            opts.accessible
        );
    }
}
