// Pure aggregation logic: field-based grouping and the global summary.
// Storage and the per-query pipeline live in stats_repo.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{AggregateField, AggregatedGroup, BotReport, GlobalSummary, StatsEntry};

/// Accessors shared by raw reports and aggregated groups so the global
/// summary has a single code path over either. Groups carry no elapsed and
/// report 0 for it.
pub trait BotLike {
    fn received(&self) -> u64;
    fn processed(&self) -> u64;
    fn in_flight(&self) -> u64;
    fn empty_polls(&self) -> u64;
    fn partitions(&self) -> u64;
    fn elapsed(&self) -> f64;
    fn throughput(&self) -> f64;
}

impl BotLike for BotReport {
    fn received(&self) -> u64 {
        self.received
    }
    fn processed(&self) -> u64 {
        self.processed
    }
    fn in_flight(&self) -> u64 {
        self.in_flight
    }
    fn empty_polls(&self) -> u64 {
        self.empty_polls
    }
    fn partitions(&self) -> u64 {
        self.partitions
    }
    fn elapsed(&self) -> f64 {
        self.elapsed
    }
    fn throughput(&self) -> f64 {
        self.throughput
    }
}

impl BotLike for AggregatedGroup {
    fn received(&self) -> u64 {
        self.received
    }
    fn processed(&self) -> u64 {
        self.processed
    }
    fn in_flight(&self) -> u64 {
        self.in_flight
    }
    fn empty_polls(&self) -> u64 {
        self.empty_polls
    }
    fn partitions(&self) -> u64 {
        self.partitions
    }
    fn elapsed(&self) -> f64 {
        0.0
    }
    fn throughput(&self) -> f64 {
        self.throughput
    }
}

impl BotLike for StatsEntry {
    fn received(&self) -> u64 {
        match self {
            Self::Report(r) => r.received(),
            Self::Group(g) => g.received(),
        }
    }
    fn processed(&self) -> u64 {
        match self {
            Self::Report(r) => r.processed(),
            Self::Group(g) => g.processed(),
        }
    }
    fn in_flight(&self) -> u64 {
        match self {
            Self::Report(r) => r.in_flight(),
            Self::Group(g) => g.in_flight(),
        }
    }
    fn empty_polls(&self) -> u64 {
        match self {
            Self::Report(r) => r.empty_polls(),
            Self::Group(g) => g.empty_polls(),
        }
    }
    fn partitions(&self) -> u64 {
        match self {
            Self::Report(r) => r.partitions(),
            Self::Group(g) => g.partitions(),
        }
    }
    fn elapsed(&self) -> f64 {
        match self {
            Self::Report(r) => r.elapsed(),
            Self::Group(g) => g.elapsed(),
        }
    }
    fn throughput(&self) -> f64 {
        match self {
            Self::Report(r) => r.throughput(),
            Self::Group(g) => g.throughput(),
        }
    }
}

/// Sort by throughput, highest first. Stable, so insertion order breaks ties.
pub fn sort_by_throughput_desc<T: BotLike>(entries: &mut [T]) {
    entries.sort_by(|a, b| b.throughput().total_cmp(&a.throughput()));
}

/// Groups `bots` by the value of `field`. A bot lacking the attribute is
/// silently excluded from the output (intentional information-loss policy;
/// behavioral compatibility with the original dashboard). Group order follows
/// the first appearance of each key in the input.
pub fn aggregate_bots(bots: &[BotReport], field: AggregateField) -> Vec<AggregatedGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupAccum> = Vec::new();

    for bot in bots {
        let Some(key) = bot.group_key(field) else {
            continue;
        };
        let i = match index.get(&key) {
            Some(&i) => i,
            None => {
                groups.push(GroupAccum::new(key.clone()));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[i].add(bot);
    }

    groups.into_iter().map(GroupAccum::finish).collect()
}

/// Reduces any bot-like collection (raw reports or groups) into one summary.
/// elapsed is the maximum, not a sum; throughput skips zero entries; empty
/// input yields the all-zero summary.
pub fn compute_global_stats<T: BotLike>(entries: &[T]) -> GlobalSummary {
    if entries.is_empty() {
        return GlobalSummary::zero();
    }

    let received: u64 = entries.iter().map(BotLike::received).sum();
    let processed: u64 = entries.iter().map(BotLike::processed).sum();
    let in_flight: u64 = entries.iter().map(BotLike::in_flight).sum();
    let empty_polls: u64 = entries.iter().map(BotLike::empty_polls).sum();
    let partitions: u64 = entries.iter().map(BotLike::partitions).sum();
    let elapsed = entries
        .iter()
        .map(BotLike::elapsed)
        .fold(f64::NEG_INFINITY, f64::max);
    let throughput: f64 = entries
        .iter()
        .map(BotLike::throughput)
        .filter(|t| *t != 0.0)
        .sum();
    let progress = if received > 0 {
        processed as f64 / received as f64 * 100.0
    } else {
        0.0
    };

    GlobalSummary {
        bots: entries.len(),
        received,
        processed,
        in_flight,
        empty_polls,
        partitions,
        elapsed,
        throughput,
        progress,
    }
}

/// Running sums for one group while iterating the input.
struct GroupAccum {
    key: String,
    bots: Vec<String>,
    received: u64,
    processed: u64,
    erred: u64,
    in_flight: u64,
    empty_polls: u64,
    partitions: u64,
    throughput: f64,
    queue_size: u64,
    transactions: u64,
    timestamp: f64,
    topic: Option<Value>,
    group_id: Option<Value>,
    ip_address: Option<Value>,
    register_at: Option<Value>,
}

impl GroupAccum {
    fn new(key: String) -> Self {
        Self {
            key,
            bots: Vec::new(),
            received: 0,
            processed: 0,
            erred: 0,
            in_flight: 0,
            empty_polls: 0,
            partitions: 0,
            throughput: 0.0,
            queue_size: 0,
            transactions: 0,
            timestamp: 0.0,
            topic: None,
            group_id: None,
            ip_address: None,
            register_at: None,
        }
    }

    fn add(&mut self, bot: &BotReport) {
        self.received += bot.received;
        self.processed += bot.processed;
        self.erred += bot.extra_counter("erred");
        self.in_flight += bot.in_flight;
        self.empty_polls += bot.empty_polls;
        self.partitions += bot.partitions;
        self.throughput += bot.throughput;
        self.queue_size += bot.extra_counter("queue_size");
        self.transactions += bot.extra_counter("transactions");
        // Most recent member timestamp wins.
        if self.bots.is_empty() || bot.timestamp > self.timestamp {
            self.timestamp = bot.timestamp;
        }
        self.bots.push(bot.bot_id.clone());

        // First non-missing value wins for descriptive attributes.
        if self.topic.is_none() {
            self.topic = bot.attribute("topic");
        }
        if self.group_id.is_none() {
            self.group_id = bot.attribute("group_id");
        }
        if self.ip_address.is_none() {
            self.ip_address = bot.attribute("ip_address");
        }
        if self.register_at.is_none() {
            self.register_at = bot.attribute("register_at");
        }
    }

    fn finish(self) -> AggregatedGroup {
        let bots_count = self.bots.len();
        AggregatedGroup {
            bot_id: format!("{} ({} bots)", self.key, bots_count),
            bots_count,
            bots: self.bots,
            received: self.received,
            processed: self.processed,
            erred: self.erred,
            in_flight: self.in_flight,
            empty_polls: self.empty_polls,
            partitions: self.partitions,
            throughput: self.throughput,
            queue_size: self.queue_size,
            transactions: self.transactions,
            timestamp: self.timestamp,
            topic: self.topic,
            group_id: self.group_id,
            ip_address: self.ip_address,
            register_at: self.register_at,
        }
    }
}
