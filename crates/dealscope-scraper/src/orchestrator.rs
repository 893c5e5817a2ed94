//! Run orchestration: one browser session, many site adapters.
//!
//! A run acquires exactly one session and shares it sequentially across the
//! selected adapters — a session is one exclusive browsing context and
//! cannot serve concurrent navigations. Adapter failures are collected, not
//! fatal; only session acquisition failure aborts the run. Whatever happens
//! (success, adapter errors, cancellation), the session is closed before
//! the orchestrator returns.

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use dealscope_core::{
    config::SiteTuning, ProductRecord, RunSummary, SiteFailureNote, SiteTally, Source,
};

use crate::driver::SessionProvider;
use crate::error::ScrapeError;
use crate::extract::{ProfileAdapter, SiteAdapter};
use crate::sites;

/// Result of one orchestrated run: the merged, ranked records plus the
/// run's bookkeeping.
#[derive(Debug)]
pub struct RunOutcome {
    pub records: Vec<ProductRecord>,
    pub summary: RunSummary,
}

pub struct Orchestrator {
    adapters: Vec<Box<dyn SiteAdapter>>,
    price_floor: u64,
}

impl Orchestrator {
    /// An orchestrator over explicit adapters. Tests inject synthetic
    /// adapters here; production callers use [`Orchestrator::for_sources`].
    #[must_use]
    pub fn new(adapters: Vec<Box<dyn SiteAdapter>>, price_floor: u64) -> Self {
        Self {
            adapters,
            price_floor,
        }
    }

    /// An orchestrator over the profile-driven adapters for `sources`,
    /// in the given order.
    #[must_use]
    pub fn for_sources(sources: &[Source], tuning: SiteTuning, price_floor: u64) -> Self {
        let adapters = sites::profiles_for(sources, tuning)
            .into_iter()
            .map(|profile| Box::new(ProfileAdapter::new(profile)) as Box<dyn SiteAdapter>)
            .collect();
        Self::new(adapters, price_floor)
    }

    /// Executes one run for `query` across all configured adapters.
    ///
    /// Cancellation via `cancel` stops before the next adapter and aborts
    /// an in-flight one; the session is still released.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Session`] when no browser session can be
    /// acquired. Adapter failures are reported in the summary instead.
    pub async fn run(
        &self,
        provider: &dyn SessionProvider,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, ScrapeError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(%run_id, query, sites = self.adapters.len(), "run starting");

        let session = provider.acquire().await.map_err(ScrapeError::Session)?;

        let mut collected: Vec<ProductRecord> = Vec::new();
        let mut tallies: Vec<SiteTally> = Vec::new();
        let mut failures: Vec<SiteFailureNote> = Vec::new();
        let mut cancelled = false;

        for adapter in &self.adapters {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let source = adapter.source();
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::info!(%run_id, site = %source, "run cancelled mid-site");
                    cancelled = true;
                    break;
                }
                result = adapter.extract(session.as_ref(), query) => match result {
                    Ok(records) => {
                        tallies.push(SiteTally {
                            source,
                            accepted: records.len(),
                        });
                        collected.extend(records);
                    }
                    Err(error) => {
                        tracing::warn!(%run_id, site = %source, %error, "adapter failed");
                        failures.push(SiteFailureNote {
                            source,
                            message: error.to_string(),
                        });
                    }
                },
            }
        }

        // The session is released on every path through the loop above;
        // a close failure is logged, never propagated over the results.
        if let Err(error) = session.close().await {
            tracing::warn!(%run_id, %error, "failed to close browser session");
        }

        let records = merge_and_rank(collected, self.price_floor);
        tracing::info!(
            %run_id,
            total = records.len(),
            failed_sites = failures.len(),
            cancelled,
            "run finished"
        );

        Ok(RunOutcome {
            records,
            summary: RunSummary {
                run_id,
                query: query.to_owned(),
                started_at,
                finished_at: Utc::now(),
                tallies,
                failures,
                cancelled,
            },
        })
    }
}

/// Merges per-site records into the final ranking: records with no
/// normalized price or a price below `floor` are dropped, the rest sorted
/// ascending by price. The sort is stable, so equal prices keep site visit
/// order. All other fields pass through unmodified.
#[must_use]
pub fn merge_and_rank(records: Vec<ProductRecord>, floor: u64) -> Vec<ProductRecord> {
    let mut ranked: Vec<ProductRecord> = records
        .into_iter()
        .filter(|r| r.price.is_some_and(|p| p >= floor))
        .collect();
    ranked.sort_by_key(|r| r.price.unwrap_or(u64::MAX));
    ranked
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
