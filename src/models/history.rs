// Timestamped capture of the active-bot list

use serde::Serialize;

use super::BotReport;

/// One history entry: the pre-aggregation, throughput-sorted active bots at
/// query time. Stored snapshots are not frozen: later writes retroactively
/// drop reports for bots that have gone inactive.
#[derive(Debug, Clone, Serialize)]
pub struct HistorySnapshot {
    pub timestamp: f64,
    pub stats: Vec<BotReport>,
}
