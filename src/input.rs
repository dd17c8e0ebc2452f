//! Provides a means to read, parse and hold configuration options for scans.
use clap::{ArgAction, Parser};
use serde_derive::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::target::ScanTarget;

const LOWEST_PORT_NUMBER: u32 = 1;
const TOP_PORT_NUMBER: u32 = 65535;

/// Port specification used when none is given.
pub const DEFAULT_PORTS: &str = "1-1000";
/// Connect timeout in seconds used when none is given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Ports as handed to the scanner: order and duplicates preserved.
pub type Ports = Vec<u32>;

/// How the user wrote the port list. Only affects progress messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSpecKind {
    /// `start-end`, inclusive.
    Range,
    /// Comma separated list of single ports.
    List,
}

/// Parses a port specification.
///
/// Either an inclusive `start-end` range with
/// `1 <= start <= end <= 65535`, or a comma separated list of ports in
/// `1..=65535`. List entries are kept in the given order and duplicates are
/// not removed.
///
/// ```rust
/// # use portsweep::input::parse_port_spec;
/// assert_eq!(parse_port_spec("20-23").unwrap(), vec![20, 21, 22, 23]);
/// assert_eq!(parse_port_spec("443,80,443").unwrap(), vec![443, 80, 443]);
/// assert!(parse_port_spec("0-10").is_err());
/// ```
pub fn parse_port_spec(input: &str) -> Result<Ports, ConfigError> {
    classify_port_spec(input).map(|(_, ports)| ports)
}

/// Like [`parse_port_spec`], also reporting which form the input took.
pub fn classify_port_spec(input: &str) -> Result<(PortSpecKind, Ports), ConfigError> {
    let input = input.trim();

    if let Some((start, end)) = as_range(input) {
        let start = parse_number(start)?;
        let end = parse_number(end)?;
        if start < LOWEST_PORT_NUMBER || start > end || end > TOP_PORT_NUMBER {
            return Err(ConfigError::InvalidRange { start, end });
        }
        return Ok((PortSpecKind::Range, (start..=end).collect()));
    }

    let ports = input
        .split(',')
        .map(|token| {
            let port = parse_number(token.trim())?;
            if (LOWEST_PORT_NUMBER..=TOP_PORT_NUMBER).contains(&port) {
                Ok(port)
            } else {
                Err(ConfigError::PortOutOfRange(port))
            }
        })
        .collect::<Result<Ports, _>>()?;

    Ok((PortSpecKind::List, ports))
}

/// Splits `digits-digits`. Anything else is treated as a list.
fn as_range(input: &str) -> Option<(&str, &str)> {
    let (start, end) = input.split_once('-')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    (all_digits(start) && all_digits(end)).then_some((start, end))
}

fn parse_number(token: &str) -> Result<u32, ConfigError> {
    // `u32::from_str` accepts a leading `+`, ports don't.
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidPort(token.to_owned()));
    }
    token
        .parse::<u32>()
        .map_err(|_| ConfigError::InvalidPort(token.to_owned()))
}

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "portsweep",
    version = env!("CARGO_PKG_VERSION"),
    max_term_width = 120,
    disable_help_flag = true,
    help_template = "{bin} {version}\n{about}\n\nUSAGE:\n    {usage}\n\nOPTIONS:\n{options}",
)]
#[allow(clippy::struct_excessive_bools)]
/// Concurrent TCP connect scanner for a single host.
/// Every port is probed at the same time, so large port lists need a
/// matching open file limit.
pub struct Opts {
    /// Host to scan, e.g. 101.43.75.11 or scanme.nmap.org.
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Ports to scan: a range such as 1-1000 or a list such as 22,80,443. [default: 1-1000]
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Seconds to wait for each connection before assuming the port is closed. [default: 2]
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Automatically ups the ULIMIT with the value you provided.
    #[arg(short, long)]
    pub ulimit: Option<u64>,

    /// Accessible mode. Turns off colours and decoration.
    #[arg(long)]
    pub accessible: bool,

    /// Hide the banner.
    #[arg(long)]
    pub no_banner: bool,

    /// Whether to ignore the configuration file or not.
    #[arg(short, long)]
    pub no_config: bool,

    /// Custom path to config file.
    #[arg(short, long, value_parser)]
    pub config_path: Option<PathBuf>,

    /// Print help.
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[cfg(not(tarpaulin_include))]
impl Opts {
    /// Reads the command line arguments.
    #[must_use]
    pub fn read() -> Self {
        Self::parse()
    }

    /// Fills options left unset on the command line from the configuration
    /// file. Command line values always win.
    pub fn merge(&mut self, config: &Config) {
        if !self.no_config {
            self.merge_optional(config);
            self.merge_flags(config);
        }
    }

    fn merge_optional(&mut self, config: &Config) {
        macro_rules! merge_optional {
            ($($field: ident),+) => {
                $(
                    if self.$field.is_none() {
                        self.$field = config.$field.clone();
                    }
                )+
            }
        }

        merge_optional!(host, ports, timeout, ulimit);
    }

    fn merge_flags(&mut self, config: &Config) {
        macro_rules! merge_flags {
            ($($field: ident),+) => {
                $(
                    if let Some(e) = config.$field {
                        self.$field |= e;
                    }
                )+
            }
        }

        merge_flags!(accessible, no_banner);
    }

    /// Loads the configuration file these options point at. With
    /// `--no-config` the file is not touched at all.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        if self.no_config {
            return Ok(Config::default());
        }
        Config::read(self.config_path.clone())
    }

    /// Validates the options into a scan plan.
    pub fn resolve(&self) -> Result<ScanPlan, ConfigError> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(ConfigError::MissingHost)?;

        let spec = self.ports.as_deref().unwrap_or(DEFAULT_PORTS);
        let (kind, ports) = classify_port_spec(spec)?;

        let timeout = match self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => return Err(ConfigError::InvalidTimeout),
            secs => Duration::from_secs(secs),
        };

        Ok(ScanPlan {
            host: host.to_owned(),
            spec: spec.trim().to_owned(),
            kind,
            ports,
            timeout,
        })
    }
}

/// Validated scan parameters, built once from [`Opts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    /// Host to scan.
    pub host: String,
    /// The port specification as written.
    pub spec: String,
    /// Which form `spec` took.
    pub kind: PortSpecKind,
    /// Ports expanded from `spec`.
    pub ports: Ports,
    /// Per-probe connect timeout.
    pub timeout: Duration,
}

impl ScanPlan {
    /// Builds the unscanned target described by this plan.
    #[must_use]
    pub fn target(&self) -> ScanTarget {
        ScanTarget::new(self.host.clone(), self.ports.clone()).with_timeout(self.timeout)
    }
}

/// Struct used to deserialize the options specified within our config file.
/// These will be further merged with our command line arguments in order to
/// generate the final Opts struct.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    host: Option<String>,
    ports: Option<String>,
    timeout: Option<u64>,
    ulimit: Option<u64>,
    accessible: Option<bool>,
    no_banner: Option<bool>,
}

#[cfg(not(tarpaulin_include))]
impl Config {
    /// Reads the configuration file with TOML format and parses it into a
    /// Config struct. A missing default file yields an empty configuration;
    /// a missing file given with `--config-path` is an error.
    ///
    /// # Format
    ///
    /// host = "scanme.nmap.org"
    /// ports = "1-1000"
    /// timeout = 2
    /// ulimit = 5000
    /// accessible = false
    /// no_banner = false
    ///
    pub fn read(custom_config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let explicit = custom_config_path.is_some();
        let Some(path) = custom_config_path.or_else(default_config_path) else {
            return Ok(Self::default());
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !explicit => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::ConfigRead { path, source }),
        };

        Self::parse(&content)
    }

    /// Parses TOML configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Constructs default path to config toml, `None` without a home directory.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut config_path = dirs::home_dir()?;
    config_path.push(".portsweep.toml");
    Some(config_path)
}
