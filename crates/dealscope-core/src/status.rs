use serde::{Deserialize, Serialize};

/// Snapshot of the process-wide scrape job state.
///
/// Owned by the run service; mutated only by the task executing a run and
/// read concurrently by status-polling callers. Progress is coarse by
/// design: 10 (initializing) → 30 (scraping) → 90 (processing) → 100
/// (done or error) — it reports phase, not fine-grained completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub running: bool,
    /// 0–100.
    pub progress: u8,
    pub message: String,
    pub last_query: Option<String>,
}

impl JobStatus {
    /// Progress value reported while the run initializes.
    pub const PROGRESS_INIT: u8 = 10;
    /// Progress value reported while adapters are scraping.
    pub const PROGRESS_SCRAPING: u8 = 30;
    /// Progress value reported while results are merged and ranked.
    pub const PROGRESS_PROCESSING: u8 = 90;
    /// Terminal progress value for both success and failure.
    pub const PROGRESS_DONE: u8 = 100;
}

impl Default for JobStatus {
    fn default() -> Self {
        Self {
            running: false,
            progress: 0,
            message: "Ready".to_owned(),
            last_query: None,
        }
    }
}
