//! Aggregation of the event log into derived values.
//!
//! Every query folds a read-only [`EventLog`] snapshot; "now" is always an
//! explicit argument, so repeated calls with the same inputs agree.
//!
//! Daily figures use the most recent UTC calendar day present in the log.

use crate::decay::DecayModel;
use crate::time::day_of;
use crate::{Catalog, DerivedStats, EventLog, HistoryEntry, RankingEntry};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Ranking length used when the caller has no preference
pub const DEFAULT_TOP_N: usize = 3;

/// Stateless view pairing a catalog with a decay curve
#[derive(Clone, Copy, Debug)]
pub struct Aggregator<'a> {
    catalog: &'a Catalog,
    decay: DecayModel,
}

impl<'a> Aggregator<'a> {
    pub fn new(catalog: &'a Catalog, decay: DecayModel) -> Self {
        Self { catalog, decay }
    }

    /// Aggregator using the default half-life
    pub fn with_catalog(catalog: &'a Catalog) -> Self {
        Self::new(catalog, DecayModel::default())
    }

    /// Original amount of a dose; unknown substances count as zero
    fn original_mg(&self, substance_name: &str) -> f64 {
        self.catalog.caffeine_mg(substance_name).unwrap_or(0.0)
    }

    /// Distinct substance names in the log that the catalog does not know, sorted
    pub fn unknown_substances(&self, log: &EventLog) -> Vec<String> {
        let names: BTreeSet<&str> = log
            .iter()
            .map(|event| event.substance_name.as_str())
            .filter(|name| !self.catalog.contains(name))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Total caffeine still active at `now`, rounded to whole mg
    ///
    /// Per-dose amounts are summed unrounded; only the total is rounded.
    pub fn current_active_level(&self, log: &EventLog, now: i64) -> f64 {
        let total: f64 = log
            .iter()
            .map(|event| {
                let original = self.original_mg(&event.substance_name);
                self.decay
                    .remaining_amount(original, now.saturating_sub(event.timestamp))
            })
            .fold(0.0, |acc, mg| acc + mg);

        tracing::debug!("Active level {:.2} mg over {} events", total, log.len());
        total.round()
    }

    /// Daily totals for the latest day, average events per day and cost totals
    pub fn daily_summary(&self, log: &EventLog) -> DerivedStats {
        let Some(latest) = log.latest_timestamp() else {
            return DerivedStats::default();
        };
        let latest_day = day_of(latest);

        let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
        let mut total_cost_usd = 0.0;

        for event in log {
            let day = days.entry(day_of(event.timestamp)).or_default();
            day.caffeine_mg += self.original_mg(&event.substance_name);
            day.cost_usd += event.cost_usd;
            day.count += 1;
            total_cost_usd += event.cost_usd;
        }

        let latest_totals = days.get(&latest_day).copied().unwrap_or_default();
        let day_count = days.len().max(1);

        DerivedStats {
            daily_caffeine_mg: latest_totals.caffeine_mg,
            average_daily_coffees: log.len() as f64 / day_count as f64,
            daily_cost_usd: latest_totals.cost_usd,
            total_cost_usd,
        }
    }

    /// The `n` most frequently logged substances
    ///
    /// Sorted by count descending, then name ascending. Fewer than `n` entries
    /// are returned when fewer substances exist.
    pub fn top_ranking(&self, log: &EventLog, n: usize) -> Vec<RankingEntry> {
        let total = log.len();
        if total == 0 {
            return Vec::new();
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for event in log {
            *counts.entry(event.substance_name.as_str()).or_insert(0) += 1;
        }

        let mut ranking: Vec<RankingEntry> = counts
            .into_iter()
            .map(|(name, count)| RankingEntry {
                substance_name: name.to_string(),
                count,
                percentage: (count as f64 / total as f64 * 100.0).round() as u32,
            })
            .collect();

        ranking.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.substance_name.cmp(&b.substance_name))
        });
        ranking.truncate(n);
        ranking
    }

    /// One entry per event, newest first
    pub fn history(&self, log: &EventLog, now: i64) -> Vec<HistoryEntry> {
        log.newest_first()
            .map(|event| {
                let substance = self.catalog.get(&event.substance_name);
                let original_mg = substance.map(|s| s.caffeine_mg).unwrap_or(0.0);
                let elapsed_ms = now.saturating_sub(event.timestamp).max(0);

                HistoryEntry {
                    timestamp: event.timestamp,
                    substance_name: event.substance_name.clone(),
                    cost_usd: event.cost_usd,
                    tier: substance.map(|s| s.tier),
                    original_mg,
                    remaining_mg: self.decay.remaining_amount(original_mg, elapsed_ms).round(),
                    elapsed_ms,
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct DayTotals {
    caffeine_mg: f64,
    cost_usd: f64,
    count: usize,
}
