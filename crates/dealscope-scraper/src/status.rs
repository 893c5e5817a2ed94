//! Process-wide job status.
//!
//! A single [`JobStatus`] snapshot behind a short-held lock: reads never
//! block on the run itself, and the raw fields are never exposed mutably.
//! Mutators are crate-private — only the run service, on the task executing
//! the run, may move the status through its lifecycle.

use std::sync::{Arc, PoisonError, RwLock};

use dealscope_core::JobStatus;

use crate::error::ScrapeError;

#[derive(Clone, Default)]
pub struct StatusTracker {
    inner: Arc<RwLock<JobStatus>>,
}

impl StatusTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only snapshot of the current status.
    #[must_use]
    pub fn snapshot(&self) -> JobStatus {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically claims the run slot: transitions to
    /// `running / initializing` unless a run is already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::AlreadyRunning`] without touching the
    /// in-progress status when `running` is already true.
    pub(crate) fn try_begin(&self, query: &str) -> Result<(), ScrapeError> {
        let mut status = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if status.running {
            return Err(ScrapeError::AlreadyRunning);
        }
        *status = JobStatus {
            running: true,
            progress: JobStatus::PROGRESS_INIT,
            message: "Initializing scraper...".to_owned(),
            last_query: Some(query.to_owned()),
        };
        Ok(())
    }

    /// Advances progress within a running job.
    pub(crate) fn update(&self, progress: u8, message: &str) {
        let mut status = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        status.progress = progress;
        status.message = message.to_owned();
    }

    /// Terminal transition for a successful run.
    pub(crate) fn finish(&self, message: String) {
        self.complete(message);
    }

    /// Terminal transition for a failed run. The message is the only
    /// user-visible error channel.
    pub(crate) fn fail(&self, message: String) {
        self.complete(message);
    }

    fn complete(&self, message: String) {
        let mut status = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        status.running = false;
        status.progress = JobStatus::PROGRESS_DONE;
        status.message = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_transitions_to_initializing() {
        let tracker = StatusTracker::new();
        tracker.try_begin("iphone 15").unwrap();
        let status = tracker.snapshot();
        assert!(status.running);
        assert_eq!(status.progress, JobStatus::PROGRESS_INIT);
        assert_eq!(status.last_query.as_deref(), Some("iphone 15"));
    }

    #[test]
    fn second_begin_is_rejected_and_leaves_status_untouched() {
        let tracker = StatusTracker::new();
        tracker.try_begin("iphone 15").unwrap();
        tracker.update(JobStatus::PROGRESS_SCRAPING, "Scraping products...");
        let before = tracker.snapshot();

        let err = tracker.try_begin("galaxy s23").unwrap_err();
        assert!(matches!(err, ScrapeError::AlreadyRunning));
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn finish_ends_the_run() {
        let tracker = StatusTracker::new();
        tracker.try_begin("iphone 15").unwrap();
        tracker.finish("Found 12 products".to_owned());
        let status = tracker.snapshot();
        assert!(!status.running);
        assert_eq!(status.progress, JobStatus::PROGRESS_DONE);
        assert_eq!(status.message, "Found 12 products");
        // The query is retained for the next status poll.
        assert_eq!(status.last_query.as_deref(), Some("iphone 15"));
    }

    #[test]
    fn fail_ends_the_run_with_the_error_message() {
        let tracker = StatusTracker::new();
        tracker.try_begin("iphone 15").unwrap();
        tracker.fail("Error: browser session could not be acquired".to_owned());
        let status = tracker.snapshot();
        assert!(!status.running);
        assert!(status.message.starts_with("Error:"));
    }

    #[test]
    fn slot_is_reusable_after_completion() {
        let tracker = StatusTracker::new();
        tracker.try_begin("first").unwrap();
        tracker.finish("Found 0 products".to_owned());
        assert!(tracker.try_begin("second").is_ok());
    }
}
