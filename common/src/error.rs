use std::path::PathBuf;

use thiserror::Error;

use crate::network::transport::Transport;

/// Every failure a run can produce.
///
/// The first group is absorbed where it happens and only ends up in the error log;
/// the second group aborts the run.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a valid IP or CIDR block")]
    InvalidTarget { raw: String },

    #[error("port closed ({port}/{transport})")]
    PortUnreachable { port: u16, transport: Transport },

    #[error("API '{label}' unauthorized")]
    AuthorizationFailure { label: String },

    #[error("{0}")]
    QueryFailure(String),

    #[error("no API available, all {attempts} credentials were rejected")]
    CredentialsExhausted { attempts: usize },

    #[error("cannot access {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no usable credentials in {}", path.display())]
    NoCredentials { path: PathBuf },

    #[error("no services left to report")]
    EmptyReport,

    #[error("failed to write report: {0}")]
    Render(String),
}

impl ScanError {
    pub fn config(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Config {
            path: path.into(),
            source,
        }
    }

    /// Whether this error ends the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScanError::CredentialsExhausted { .. }
                | ScanError::Config { .. }
                | ScanError::NoCredentials { .. }
                | ScanError::EmptyReport
                | ScanError::Render(_)
        )
    }
}
