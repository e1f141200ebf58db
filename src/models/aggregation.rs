// Query-scoped aggregation models: groups, the global summary, and the
// /api/stats response shape.

use serde::Serialize;
use serde_json::Value;

use super::{BotReport, HistorySnapshot};

/// Attribute bots can be grouped by. Anything else (including "none" or an
/// absent selector) means no aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateField {
    IpAddress,
    Topic,
    GroupId,
}

impl AggregateField {
    /// Recognized selector values. Unknown selectors map to None and the
    /// query silently falls back to the unaggregated list.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ip_address" => Some(Self::IpAddress),
            "topic" => Some(Self::Topic),
            "group_id" => Some(Self::GroupId),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IpAddress => "ip_address",
            Self::Topic => "topic",
            Self::GroupId => "group_id",
        }
    }
}

/// One group of bots sharing a grouping-attribute value. Counters are plain
/// sums over members; timestamp is the max; the descriptive attributes carry
/// the first non-missing value seen. No group-level progress or elapsed.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedGroup {
    /// Display id: `"<field-value> (<member-count> bots)"`.
    pub bot_id: String,
    pub bots_count: usize,
    /// Member bot ids in input order.
    pub bots: Vec<String>,
    pub received: u64,
    pub processed: u64,
    pub erred: u64,
    pub in_flight: u64,
    pub empty_polls: u64,
    pub partitions: u64,
    pub throughput: f64,
    pub queue_size: u64,
    pub transactions: u64,
    pub timestamp: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub register_at: Option<Value>,
}

/// Summary across whatever collection the query pipeline served (raw bots or
/// groups; groups count as units, never their members).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalSummary {
    pub bots: usize,
    pub received: u64,
    pub processed: u64,
    pub in_flight: u64,
    pub empty_polls: u64,
    pub partitions: u64,
    pub elapsed: f64,
    pub throughput: f64,
    pub progress: f64,
}

impl GlobalSummary {
    pub fn zero() -> Self {
        Self {
            bots: 0,
            received: 0,
            processed: 0,
            in_flight: 0,
            empty_polls: 0,
            partitions: 0,
            elapsed: 0.0,
            throughput: 0.0,
            progress: 0.0,
        }
    }
}

/// Entry in the served stats list: a raw report, or a group when aggregation
/// was requested.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StatsEntry {
    Report(BotReport),
    Group(AggregatedGroup),
}

/// GET /api/stats response body.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub global: GlobalSummary,
    pub stats: Vec<StatsEntry>,
    pub history: Vec<HistorySnapshot>,
    /// The selector as the caller sent it (echoed even when unrecognized).
    pub aggregated_by: Option<String>,
}
