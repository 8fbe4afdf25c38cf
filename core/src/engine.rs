//! # Host query engine
//!
//! Queries every target in order. For one target the credentials are tried first to
//! last: a rejected credential moves on to the next one, anything else ends the
//! attempt for that target. Rejections are counted over the whole run; once the count
//! reaches the pool size the run stops, since by then every credential has been
//! rejected at least once.

use exposr_common::credential::CredentialPool;
use exposr_common::error::ScanError;
use exposr_common::error_log::ErrorLog;
use exposr_common::network::target::Target;
use tracing::{debug, error, info, warn};

use crate::lookup::{HostLookup, LookupOutcome};
use crate::models::{HostResult, ScanResults};
use crate::network::probe::Reachability;

pub mod normalize;

/// Called with `(done, total)` after each target.
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

pub struct QueryEngine<L, P> {
    lookup: L,
    prober: P,
    credentials: CredentialPool,
    /// Authorization failures so far in this run. Never reset between targets.
    rejections: usize,
    on_progress: Option<ProgressCallback>,
}

impl<L, P> QueryEngine<L, P>
where
    L: HostLookup,
    P: Reachability,
{
    pub fn new(lookup: L, prober: P, credentials: CredentialPool) -> Self {
        Self {
            lookup,
            prober,
            credentials,
            rejections: 0,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn rejections(&self) -> usize {
        self.rejections
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Queries all `targets` sequentially.
    ///
    /// Returns [`ScanError::CredentialsExhausted`] as soon as the pool is used up;
    /// results gathered until then are discarded with it.
    pub async fn run(&mut self, targets: &[Target], log: &mut ErrorLog) -> Result<ScanResults, ScanError> {
        let mut results = ScanResults::new();
        let total = targets.len();

        for (idx, target) in targets.iter().enumerate() {
            info!("Querying {} ({}/{total})", target.addr, idx + 1);
            let result = self.query(target, log).await?;
            results.insert(target.addr, result);

            if let Some(on_progress) = &self.on_progress {
                on_progress(idx + 1, total);
            }
        }

        Ok(results)
    }

    /// Resolves a single target, rotating through credentials on rejection.
    pub async fn query(&mut self, target: &Target, log: &mut ErrorLog) -> Result<HostResult, ScanError> {
        for credential in self.credentials.iter() {
            debug!("Trying credential '{}' for {}", credential.label(), target.addr);

            match self.lookup.view(target.addr, credential).await {
                LookupOutcome::Found(view) => {
                    let result = normalize::normalize(target, view, &self.prober, log).await;
                    return Ok(result);
                }
                LookupOutcome::Unauthorized => {
                    let rejected = ScanError::AuthorizationFailure {
                        label: credential.label().to_string(),
                    };
                    warn!("{rejected}, trying the next one");
                    log.record(target.row, target.addr, &rejected);

                    self.rejections += 1;
                    if self.rejections >= self.credentials.len() {
                        return Err(exhausted(target, self.rejections, log));
                    }
                }
                LookupOutcome::Failed(message) => {
                    let failure = ScanError::QueryFailure(message);
                    error!("Lookup for {} failed: {failure}", target.addr);
                    log.record(target.row, target.addr, &failure);
                    return Ok(HostResult::Failed {
                        error: failure.to_string(),
                    });
                }
            }
        }

        // Only reachable with an empty pool.
        Err(exhausted(target, self.rejections, log))
    }
}

fn exhausted(target: &Target, attempts: usize, log: &mut ErrorLog) -> ScanError {
    let err = ScanError::CredentialsExhausted { attempts };
    error!("{err}");
    log.record(target.row, target.addr, "no API available");
    err
}
