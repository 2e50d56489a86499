//! Core domain types for the Jolt caffeine tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Substances and their caffeine content
//! - Consumption events and the event log
//! - Derived statistics, ranking and history views

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashMap;

// ============================================================================
// Substance Types
// ============================================================================

/// Caffeine content class of a substance
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubstanceTier {
    Low,
    Medium,
    High,
}

impl SubstanceTier {
    /// Upper bound (exclusive) of the Low class, in mg
    pub const LOW_CONTENT_MAX_MG: f64 = 60.0;
    /// Upper bound (exclusive) of the Medium class, in mg
    pub const MEDIUM_CONTENT_MAX_MG: f64 = 120.0;

    /// Derive the class from a caffeine content
    pub fn for_content(caffeine_mg: f64) -> Self {
        if caffeine_mg < Self::LOW_CONTENT_MAX_MG {
            SubstanceTier::Low
        } else if caffeine_mg < Self::MEDIUM_CONTENT_MAX_MG {
            SubstanceTier::Medium
        } else {
            SubstanceTier::High
        }
    }
}

/// A catalog entry (e.g., "Espresso", 63 mg)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Substance {
    pub name: String,
    pub caffeine_mg: f64,
    pub tier: SubstanceTier,
}

impl Substance {
    /// Build a substance whose tier is derived from its content
    pub fn new(name: impl Into<String>, caffeine_mg: f64) -> Self {
        Self {
            name: name.into(),
            caffeine_mg,
            tier: SubstanceTier::for_content(caffeine_mg),
        }
    }
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The complete catalog of substances, keyed by name
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub substances: HashMap<String, Substance>,
}

// ============================================================================
// Event Types
// ============================================================================

/// One logged intake of a substance
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConsumptionEvent {
    /// Epoch milliseconds; doubles as the event id
    pub timestamp: i64,
    pub substance_name: String,
    pub cost_usd: f64,
}

impl ConsumptionEvent {
    pub fn new(timestamp: i64, substance_name: impl Into<String>, cost_usd: f64) -> Self {
        Self {
            timestamp,
            substance_name: substance_name.into(),
            cost_usd,
        }
    }
}

/// Snapshot of all consumption events keyed by timestamp
///
/// Timestamps are unique: inserting an event whose timestamp already exists
/// replaces the previous event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventLog {
    events: BTreeMap<i64, ConsumptionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, returning the event it replaced (if any)
    pub fn insert(&mut self, event: ConsumptionEvent) -> Option<ConsumptionEvent> {
        self.events.insert(event.timestamp, event)
    }

    pub fn get(&self, timestamp: i64) -> Option<&ConsumptionEvent> {
        self.events.get(&timestamp)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate events in no particular guaranteed order
    pub fn iter(&self) -> btree_map::Values<'_, i64, ConsumptionEvent> {
        self.events.values()
    }

    /// Events sorted most recent first (display order)
    pub fn newest_first(&self) -> impl Iterator<Item = &ConsumptionEvent> {
        self.events.values().rev()
    }

    /// The most recent timestamp in the log
    pub fn latest_timestamp(&self) -> Option<i64> {
        self.events.keys().next_back().copied()
    }
}

impl FromIterator<ConsumptionEvent> for EventLog {
    fn from_iter<I: IntoIterator<Item = ConsumptionEvent>>(iter: I) -> Self {
        let mut log = EventLog::new();
        for event in iter {
            log.insert(event);
        }
        log
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a ConsumptionEvent;
    type IntoIter = btree_map::Values<'a, i64, ConsumptionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Derived Types
// ============================================================================

/// Aggregate statistics over the event log, recomputed on every query
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DerivedStats {
    /// Undecayed caffeine consumed on the most recent day in the log
    pub daily_caffeine_mg: f64,
    /// Events per distinct day that has at least one event
    pub average_daily_coffees: f64,
    /// Cost spent on the most recent day in the log
    pub daily_cost_usd: f64,
    /// Cost across the whole log
    pub total_cost_usd: f64,
}

/// One row of the frequency ranking
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingEntry {
    pub substance_name: String,
    pub count: usize,
    /// Share of all events, rounded to a whole percent
    pub percentage: u32,
}

/// Per-event view used by history listings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub timestamp: i64,
    pub substance_name: String,
    pub cost_usd: f64,
    /// `None` when the substance is not in the catalog
    pub tier: Option<SubstanceTier>,
    pub original_mg: f64,
    /// Decayed amount, rounded to whole mg
    pub remaining_mg: f64,
    /// Time since the event, never negative
    pub elapsed_ms: i64,
}
