// Domain models (ported from the Python dashboard)

mod aggregation;
mod history;
mod report;

pub use aggregation::{AggregateField, AggregatedGroup, GlobalSummary, StatsEntry, StatsResponse};
pub use history::HistorySnapshot;
pub use report::BotReport;
