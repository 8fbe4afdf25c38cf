use std::path::PathBuf;
use std::time::Duration;

use crate::error_log::DEFAULT_ERROR_LOG;

pub const DEFAULT_API_URL: &str = "https://search.censys.io/api";
pub const DEFAULT_OUTPUT: &str = "output.xlsx";

/// Connect timeout for reachability probes.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Config {
    pub targets_path: PathBuf,
    pub credentials_path: PathBuf,
    pub output_path: PathBuf,
    pub error_log_path: PathBuf,
    /// Where to dump the raw per-IP results as JSON, if anywhere.
    pub json_path: Option<PathBuf>,
    /// Base URL of the host lookup API.
    pub api_url: String,
    pub probe_timeout: Duration,
    /// Suppresses headers and progress output.
    pub quiet: bool,
}

impl Config {
    pub fn new(targets_path: impl Into<PathBuf>, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            targets_path: targets_path.into(),
            credentials_path: credentials_path.into(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            error_log_path: PathBuf::from(DEFAULT_ERROR_LOG),
            json_path: None,
            api_url: DEFAULT_API_URL.to_string(),
            probe_timeout: PROBE_TIMEOUT,
            quiet: false,
        }
    }
}
