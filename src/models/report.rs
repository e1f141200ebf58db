// Per-bot status report as sent by workers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AggregateField;

/// One status report from a worker bot. The numeric counters and timestamp
/// are required on the wire; anything else the worker sends (topic, group_id,
/// register_at, custom fields) lands in `extra` and is echoed back verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotReport {
    pub bot_id: String,
    pub received: u64,
    pub processed: u64,
    pub in_flight: u64,
    pub throughput: f64,
    pub elapsed: f64,
    pub empty_polls: u64,
    pub partitions: u64,
    pub progress: f64,
    /// Epoch seconds at which the bot produced this report.
    pub timestamp: f64,
    /// Caller's network origin, attached at ingest (not trusted from the body).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BotReport {
    /// Descriptive attribute lookup used by aggregation. `ip_address` is a
    /// typed field; the rest live in the open `extra` map.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        if name == "ip_address" {
            return self.ip_address.clone().map(Value::String);
        }
        self.extra.get(name).cloned()
    }

    /// Grouping key for `field`, or None when the bot lacks the attribute
    /// (such bots are excluded from aggregated output).
    pub fn group_key(&self, field: AggregateField) -> Option<String> {
        let value = self.attribute(field.as_str())?;
        Some(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Optional numeric counter from `extra` (erred, queue_size, transactions);
    /// missing or non-numeric counts as 0.
    pub fn extra_counter(&self, name: &str) -> u64 {
        self.extra.get(name).and_then(Value::as_u64).unwrap_or(0)
    }
}
