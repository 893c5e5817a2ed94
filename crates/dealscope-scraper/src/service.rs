//! The run service: the surface the surrounding application talks to.
//!
//! `start_run` validates, claims the single run slot, and returns
//! immediately; the run itself executes on a background tokio task that
//! owns the browser session for its whole duration. Status and results are
//! read concurrently through snapshots.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;

use dealscope_core::{AppConfig, JobStatus, ProductRecord, RunSummary, Source};

use crate::driver::SessionProvider;
use crate::error::ScrapeError;
use crate::orchestrator::Orchestrator;
use crate::status::StatusTracker;

pub struct ScrapeService {
    provider: Arc<dyn SessionProvider>,
    config: AppConfig,
    status: StatusTracker,
    latest: RwLock<Vec<ProductRecord>>,
    summary: RwLock<Option<RunSummary>>,
    cancel: Mutex<Option<CancellationToken>>,
}

impl ScrapeService {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>, config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            provider,
            config,
            status: StatusTracker::new(),
            latest: RwLock::new(Vec::new()),
            summary: RwLock::new(None),
            cancel: Mutex::new(None),
        })
    }

    /// Starts a run for `query` over `sources` (the configured list when
    /// `None`) and returns as soon as the background worker is spawned.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::EmptyQuery`] for a blank query.
    /// - [`ScrapeError::AlreadyRunning`] while another run is in flight;
    ///   the in-progress run is not disturbed.
    pub fn start_run(
        self: &Arc<Self>,
        query: &str,
        sources: Option<Vec<Source>>,
    ) -> Result<(), ScrapeError> {
        let query = query.trim().to_owned();
        if query.is_empty() {
            return Err(ScrapeError::EmptyQuery);
        }

        self.status.try_begin(&query)?;

        let sources = sources.unwrap_or_else(|| self.config.sources.clone());
        let token = CancellationToken::new();
        *self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(token.clone());

        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.execute(query, sources, token).await;
        });
        Ok(())
    }

    /// Cancels the in-flight run, if any. The worker still releases the
    /// session and moves the status out of `running`.
    pub fn cancel(&self) {
        if let Some(token) = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            token.cancel();
        }
    }

    /// Read-only snapshot of the job status.
    #[must_use]
    pub fn status_snapshot(&self) -> JobStatus {
        self.status.snapshot()
    }

    /// Records from the most recent completed run; empty before any run.
    #[must_use]
    pub fn last_results(&self) -> Vec<ProductRecord> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bookkeeping for the most recent completed run.
    #[must_use]
    pub fn last_summary(&self) -> Option<RunSummary> {
        self.summary
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn execute(&self, query: String, sources: Vec<Source>, token: CancellationToken) {
        self.status
            .update(JobStatus::PROGRESS_SCRAPING, "Scraping products...");

        let orchestrator =
            Orchestrator::for_sources(&sources, self.config.tuning, self.config.price_floor);

        match orchestrator.run(self.provider.as_ref(), &query, &token).await {
            Ok(outcome) => {
                self.status
                    .update(JobStatus::PROGRESS_PROCESSING, "Processing results...");
                let found = outcome.records.len();
                *self
                    .latest
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = outcome.records;
                *self
                    .summary
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(outcome.summary);
                self.status.finish(format!("Found {found} products"));
            }
            Err(error) => {
                tracing::error!(%error, "run aborted");
                self.status.fail(format!("Error: {error}"));
            }
        }

        *self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
