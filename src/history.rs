// Bounded in-memory history of active-bot snapshots.
// Not thread-safe on its own; stats_repo owns it behind the store mutex.

use std::collections::{HashSet, VecDeque};

use crate::models::{BotReport, HistorySnapshot};

pub struct HistoryBuffer {
    capacity: usize,
    entries: VecDeque<HistorySnapshot>,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Appends a snapshot of the pre-aggregation active-bot list and prunes
    /// every stored snapshot down to currently-active bot ids. Pruning is
    /// retroactive and permanent: once a bot goes inactive its reports vanish
    /// from older snapshots too. Evicts the oldest entry past capacity.
    pub fn record(&mut self, timestamp: f64, stats: Vec<BotReport>, active_ids: &HashSet<String>) {
        for entry in &mut self.entries {
            entry.stats.retain(|s| active_ids.contains(&s.bot_id));
        }
        self.entries.push_back(HistorySnapshot { timestamp, stats });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots oldest-first, as served to the dashboard.
    pub fn snapshots(&self) -> Vec<HistorySnapshot> {
        self.entries.iter().cloned().collect()
    }
}
