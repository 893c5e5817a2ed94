use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-site accepted-record count for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteTally {
    pub source: crate::Source,
    pub accepted: usize,
}

/// A site whose adapter failed during a run. The failure is informational;
/// the run continues across the remaining sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteFailureNote {
    pub source: crate::Source,
    pub message: String,
}

/// Bookkeeping for one completed (or cancelled) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub query: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per site visited, in visit order.
    pub tallies: Vec<SiteTally>,
    /// Adapters that failed; empty on a clean run.
    pub failures: Vec<SiteFailureNote>,
    /// True when the run was cancelled before visiting every selected site.
    pub cancelled: bool,
}

impl RunSummary {
    /// Total records accepted across all sites, before price filtering.
    #[must_use]
    pub fn total_accepted(&self) -> usize {
        self.tallies.iter().map(|t| t.accepted).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;

    #[test]
    fn total_accepted_sums_site_tallies() {
        let summary = RunSummary {
            run_id: Uuid::nil(),
            query: "iphone 15".to_owned(),
            started_at: Utc::now(),
            finished_at: Utc::now(),
            tallies: vec![
                SiteTally {
                    source: Source::Flipkart,
                    accepted: 7,
                },
                SiteTally {
                    source: Source::Amazon,
                    accepted: 5,
                },
            ],
            failures: vec![],
            cancelled: false,
        };
        assert_eq!(summary.total_accepted(), 12);
    }
}
