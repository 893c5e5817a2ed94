//! Randomized settle waits.
//!
//! Pages load asynchronously and unevenly; a fixed post-navigation sleep is
//! either wasteful or too short. Each site profile carries a bounds pair and
//! the engine sleeps a uniformly random duration inside it.

use std::time::Duration;

use rand::Rng;

/// Inclusive settle-wait bounds in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl SettleRange {
    #[must_use]
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }
}

/// Sleeps a uniformly random duration within `range`.
pub(crate) async fn settle(range: SettleRange) {
    let ms = if range.min_ms >= range.max_ms {
        range.min_ms
    } else {
        rand::rng().random_range(range.min_ms..=range.max_ms)
    };
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
