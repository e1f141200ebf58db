// Shared test helpers

use botboard::models::BotReport;
use serde_json::{Map, Value};

/// Minimal report; counters zeroed except throughput.
pub fn report(bot_id: &str, timestamp: f64, throughput: f64) -> BotReport {
    BotReport {
        bot_id: bot_id.into(),
        received: 0,
        processed: 0,
        in_flight: 0,
        throughput,
        elapsed: 0.0,
        empty_polls: 0,
        partitions: 0,
        progress: 0.0,
        timestamp,
        ip_address: None,
        extra: Map::new(),
    }
}

#[allow(dead_code)]
pub fn with_extra(mut r: BotReport, key: &str, value: Value) -> BotReport {
    r.extra.insert(key.into(), value);
    r
}
