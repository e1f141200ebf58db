// Handlers: report ingest, stats query, dashboard page, version

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::aggregation::{aggregate_bots, compute_global_stats, sort_by_throughput_desc};
use crate::models::{AggregateField, BotReport, StatsEntry, StatsResponse};
use crate::stats_repo::unix_now;
use crate::version::{NAME, VERSION};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET / — dashboard page, with a cache-busting build id substituted into the
/// template.
pub(super) async fn dashboard_handler() -> Html<String> {
    let build_id = unix_now() as u64;
    Html(INDEX_HTML.replace("{{ build_id }}", &build_id.to_string()))
}

/// POST /update — ingest one bot report. The caller's socket address becomes
/// the report's ip_address (never trusted from the body). Malformed payloads
/// are rejected here with 422 and never reach the store.
pub(super) async fn update_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<BotReport>, JsonRejection>,
) -> Response {
    let Json(mut report) = match payload {
        Ok(p) => p,
        Err(rejection) => {
            tracing::warn!(
                error = %rejection,
                operation = "validate_report",
                "rejected malformed bot report"
            );
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    report.ip_address = Some(addr.ip().to_string());
    if let Err(e) = state.stats_repo.ingest(report) {
        tracing::error!(error = %e, operation = "ingest", "report ingest failed");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

#[derive(Debug, Deserialize)]
pub(super) struct StatsQuery {
    /// Field to aggregate by: ip_address, topic, group_id, or none.
    aggregate_by: Option<String>,
}

/// GET /api/stats — global summary, throughput-sorted bot (or group) list,
/// pruned history, and an echo of the aggregation selector. An unrecognized
/// selector is not an error; it falls back to the unaggregated list.
pub(super) async fn api_stats_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Response {
    let now = unix_now();
    let (bots, history) = match state.stats_repo.query(now) {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, operation = "query", "stats query failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let field = params
        .aggregate_by
        .as_deref()
        .and_then(AggregateField::parse);
    let stats: Vec<StatsEntry> = match field {
        Some(f) => {
            let mut groups = aggregate_bots(&bots, f);
            sort_by_throughput_desc(&mut groups);
            groups.into_iter().map(StatsEntry::Group).collect()
        }
        None => bots.into_iter().map(StatsEntry::Report).collect(),
    };
    let global = compute_global_stats(&stats);

    Json(StatsResponse {
        global,
        stats,
        history,
        aggregated_by: params.aggregate_by,
    })
    .into_response()
}
