use std::path::Path;
use std::time::{Duration, Instant};

use colored::*;
use exposr_common::config::Config;
use exposr_common::credential::CredentialPool;
use exposr_common::error::ScanError;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target;
use exposr_common::success;
use exposr_core::engine::QueryEngine;
use exposr_core::lookup::censys::CensysClient;
use exposr_core::models::ScanResults;
use exposr_core::network::probe::SocketProber;
use exposr_core::report::{self, workbook};

use crate::terminal::{colors, print, spinner};

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let mut log = ErrorLog::open(&cfg.error_log_path)?;

    print::header("reading input", cfg.quiet);
    let credentials = CredentialPool::load(&cfg.credentials_path)?;
    if credentials.is_empty() {
        return Err(ScanError::NoCredentials {
            path: cfg.credentials_path.clone(),
        }
        .into());
    }
    print::aligned_line("Credentials", credentials.len());

    let targets = target::read_targets(&cfg.targets_path, &mut log)?;
    print::aligned_line("Targets", targets.len());

    print::header("fetching host data", cfg.quiet);
    let lookup = CensysClient::new(cfg.api_url.as_str())?;
    let prober = SocketProber::new(cfg.probe_timeout);

    let span = spinner::query_progress(targets.len());
    let guard = span.enter();
    let mut engine = QueryEngine::new(lookup, prober, credentials)
        .with_progress(spinner::progress_callback(span.clone()));
    let outcome = engine.run(&targets, &mut log).await;
    drop(guard);
    let results: ScanResults = outcome?;

    if let Some(json_path) = &cfg.json_path {
        dump_json(&results, json_path)?;
    }

    print::header("writing report", cfg.quiet);
    let rows = report::shape(&results)?;
    workbook::render(&rows, &cfg.output_path)?;
    success!("Report written to {}", cfg.output_path.display());

    print_summary(&results, rows.len(), &log, start_time.elapsed(), cfg);
    Ok(())
}

fn dump_json(results: &ScanResults, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json).map_err(|e| ScanError::config(path, e))?;
    success!("Raw results saved to {}", path.display());
    Ok(())
}

fn print_summary(results: &ScanResults, row_count: usize, log: &ErrorLog, total_time: Duration, cfg: &Config) {
    if cfg.quiet {
        return;
    }

    print::aligned_line("Hosts", results.len());
    print::aligned_line("Failed", results.error_count());
    print::aligned_line("Log entries", log.len());
    if let Some(path) = log.path() {
        print::aligned_line("Error log", path.display());
    }

    let rows: ColoredString = format!("{row_count} services").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Report complete: {rows} listed in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    print::fat_separator();
    print::centerln(&output);
}
