use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use opportunity_radar::error::AppError;
use opportunity_radar::workflows::radar::dates::deserialize_optional_date;
use opportunity_radar::workflows::radar::{
    CriteriaLoader, OpportunityLoader, RadarReport, RadarSummary, ReportOptions,
    ScoredOpportunityView, ScoringEngine,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub(crate) opportunities: Value,
    pub(crate) criteria: Value,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    #[serde(default)]
    pub(crate) urgency_window_days: Option<i64>,
    #[serde(default)]
    pub(crate) include_markdown: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankResponse {
    pub(crate) today: NaiveDate,
    pub(crate) summary: RadarSummary,
    pub(crate) opportunities: Vec<ScoredOpportunityView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) markdown: Option<String>,
}

pub(crate) fn radar_routes(defaults: ReportOptions) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/radar/rank", post(rank_endpoint))
        .layer(Extension(defaults))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn rank_endpoint(
    Extension(defaults): Extension<ReportOptions>,
    Json(payload): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let RankRequest {
        opportunities,
        criteria,
        today,
        top_n,
        urgency_window_days,
        include_markdown,
    } = payload;

    let opportunities = OpportunityLoader::from_value(opportunities)?;
    let criteria = CriteriaLoader::from_value(criteria)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let options = ReportOptions {
        top_n: top_n.unwrap_or(defaults.top_n),
        urgency_window_days: urgency_window_days.unwrap_or(defaults.urgency_window_days),
    };

    let engine = ScoringEngine::new(criteria);
    let report = RadarReport::build(&engine, &opportunities, today, options);
    info!(
        %today,
        scanned = opportunities.len(),
        ranked = report.ranked().len(),
        "ranked opportunities via api"
    );

    let markdown = if include_markdown {
        Some(report.markdown())
    } else {
        None
    };

    Ok(Json(RankResponse {
        today,
        summary: report.summary(),
        opportunities: report.payload(),
        markdown,
    }))
}
