pub mod run;

use std::path::PathBuf;

use clap::Parser;
use exposr_common::config::{Config, DEFAULT_API_URL, DEFAULT_OUTPUT};
use exposr_common::error_log::DEFAULT_ERROR_LOG;

use crate::prompt;

#[derive(Parser)]
#[command(name = "exposr")]
#[command(version)]
#[command(about = "Maps the exposed services of IPv4 hosts into a spreadsheet report.")]
pub struct CommandLine {
    /// File with one IPv4 address or CIDR block per line (asked for if omitted)
    #[arg(short, long)]
    pub targets: Option<PathBuf>,

    /// File with one key:secret or label:key:secret per line (asked for if omitted)
    #[arg(short, long)]
    pub credentials: Option<PathBuf>,

    /// Where to write the workbook
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Append-only log of skipped targets, closed ports and rejected credentials
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub log: PathBuf,

    /// Also dump the raw per-IP results as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Base URL of the host lookup API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Builds the run configuration, prompting for any input file not given as a flag.
    pub fn into_config(self) -> anyhow::Result<Config> {
        let targets = match self.targets {
            Some(path) => path,
            None => prompt::ask_path("Path to the file with the IP list")?,
        };
        let credentials = match self.credentials {
            Some(path) => path,
            None => prompt::ask_path("Path to the API credentials file")?,
        };

        let mut cfg = Config::new(targets, credentials);
        cfg.output_path = self.output;
        cfg.error_log_path = self.log;
        cfg.json_path = self.json;
        cfg.api_url = self.api_url;
        cfg.quiet = self.quiet;
        Ok(cfg)
    }
}
