//! Snapshot report combining every query for one `(log, now)` pair.

use crate::aggregate::Aggregator;
use crate::status::{StatusBand, StatusThresholds};
use crate::{DerivedStats, EventLog, RankingEntry};
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows, computed from one snapshot
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub now: i64,
    pub event_count: usize,
    pub active_level_mg: f64,
    pub status: StatusBand,
    pub stats: DerivedStats,
    pub top: Vec<RankingEntry>,
    /// Names in the log missing from the catalog; they add no caffeine
    pub unknown_substances: Vec<String>,
}

impl Report {
    pub fn build(
        aggregator: &Aggregator<'_>,
        thresholds: &StatusThresholds,
        log: &EventLog,
        now: i64,
        top_n: usize,
    ) -> Self {
        let active_level_mg = aggregator.current_active_level(log, now);
        let status = thresholds.classify(active_level_mg);

        let unknown_substances = aggregator.unknown_substances(log);
        for name in &unknown_substances {
            tracing::warn!("Unknown substance '{}' contributes no caffeine", name);
        }

        tracing::debug!(
            "Report at {}: {} mg ({})",
            now,
            active_level_mg,
            status.tier.as_str()
        );

        Self {
            now,
            event_count: log.len(),
            active_level_mg,
            status,
            stats: aggregator.daily_summary(log),
            top: aggregator.top_ranking(log, top_n),
            unknown_substances,
        }
    }
}
