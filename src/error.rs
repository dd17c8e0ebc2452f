//! Error types surfaced by the scanner and its command line front end.
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the scan parameters, detected before any network activity.
///
/// The binary treats every variant as fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No host was given on the command line or in the configuration file.
    #[error("host not specified")]
    MissingHost,
    /// A port token that is not a number.
    #[error("invalid port `{0}`")]
    InvalidPort(String),
    /// A port number outside `1..=65535`.
    #[error("port {0} must be between 1 and 65535")]
    PortOutOfRange(u32),
    /// A `start-end` range that is reversed or leaves `1..=65535`.
    #[error("port range {start}-{end} specified out of range")]
    InvalidRange {
        /// First port of the range.
        start: u32,
        /// Last port of the range.
        end: u32,
    },
    /// A zero connect timeout.
    #[error("timeout must be at least one second")]
    InvalidTimeout,
    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file `{}`: {source}", path.display())]
    ConfigRead {
        /// Location of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`Config`](crate::input::Config).
    #[error("found {0} in configuration file")]
    ConfigParse(#[from] toml::de::Error),
}

/// Errors returned when reading results out of a [`ScanTarget`](crate::target::ScanTarget).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// The target has not completed a scan since it was created or refreshed.
    #[error("host not scanned")]
    NotScanned,
}
