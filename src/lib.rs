// Library for tests to access modules

pub mod aggregation;
pub mod config;
pub mod history;
pub mod models;
pub mod routes;
pub mod stats_repo;
pub mod version;
