// Latest-report store, activity filter, and the per-query pipeline.
// A single std mutex guards the report map and the history buffer together,
// so a query never observes the store mid-write or a half-pruned snapshot.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use tracing::instrument;

use crate::aggregation::sort_by_throughput_desc;
use crate::history::HistoryBuffer;
use crate::models::{BotReport, HistorySnapshot};

pub struct StatsRepo {
    active_window_secs: f64,
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    reports: HashMap<String, BotReport>,
    history: HistoryBuffer,
}

impl StatsRepo {
    pub fn new(active_window_secs: f64, history_capacity: usize) -> Self {
        Self {
            active_window_secs,
            inner: Mutex::new(StoreInner {
                reports: HashMap::new(),
                history: HistoryBuffer::new(history_capacity),
            }),
        }
    }

    /// Stores the latest report for its bot id, replacing any prior report in
    /// full (never a partial merge).
    #[instrument(skip(self, report), fields(repo = "stats", operation = "ingest", bot_id = %report.bot_id))]
    pub fn ingest(&self, report: BotReport) -> anyhow::Result<()> {
        let mut inner = self.lock()?;
        inner.reports.insert(report.bot_id.clone(), report);
        Ok(())
    }

    /// Bots whose last report is within the freshness window. The boundary is
    /// inclusive: a report exactly `active_window_secs` old still counts.
    pub fn active(&self, now: f64) -> anyhow::Result<HashMap<String, BotReport>> {
        let inner = self.lock()?;
        Ok(inner.active(now, self.active_window_secs))
    }

    /// Full query pipeline under one lock acquisition: activity filter,
    /// throughput-descending sort, history record (with retroactive pruning).
    /// Returns the sorted active list plus the history as it now stands.
    #[instrument(skip(self), fields(repo = "stats", operation = "query"))]
    pub fn query(&self, now: f64) -> anyhow::Result<(Vec<BotReport>, Vec<HistorySnapshot>)> {
        let mut inner = self.lock()?;
        let active = inner.active(now, self.active_window_secs);
        let active_ids: HashSet<String> = active.keys().cloned().collect();

        let mut bots: Vec<BotReport> = active.into_values().collect();
        sort_by_throughput_desc(&mut bots);

        inner.history.record(now, bots.clone(), &active_ids);
        Ok((bots, inner.history.snapshots()))
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|e| anyhow::anyhow!("stats lock poisoned: {}", e))
    }
}

impl StoreInner {
    fn active(&self, now: f64, window: f64) -> HashMap<String, BotReport> {
        self.reports
            .iter()
            .filter(|(_, r)| now - r.timestamp <= window)
            .map(|(id, r)| (id.clone(), r.clone()))
            .collect()
    }
}

/// Current time as epoch seconds (the unit bot reports use).
pub fn unix_now() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0.0
        })
}
