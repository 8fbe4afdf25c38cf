//! # exposr common
//!
//! Models and input handling shared by the query pipeline and the terminal front-end.
//!
//! * **[`network`]**: target expansion (IPv4 literals and CIDR blocks) and transport types.
//! * **[`credential`]**: the ordered API credential pool.
//! * **[`error_log`]**: the append-only diagnostics journal (`log_err.txt`).
//! * **[`error`]**: the failure taxonomy every crate in the workspace reports with.
//! * **[`config`]**: run configuration assembled by the CLI.

pub mod config;
pub mod credential;
pub mod error;
pub mod error_log;
pub mod network;

/// Logs a positive outcome. Rendered with the success marker by the CLI formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "exposr::success", $($arg)*)
    };
}
