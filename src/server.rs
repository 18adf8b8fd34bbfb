use crate::config::Config;
use crate::data::{DistanceTable, Schedule, Weights};
use crate::error::EvaluationError;
use crate::evaluator::{self, Conflict, ScoreBreakdown};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::{
    Json, Router,
    routing::{get, post},
};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Body of an evaluate call. Every field is required; they are optional
/// here so that a missing one gets a proper error instead of a parse failure.
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub schedule: Option<Schedule>,
    pub distances: Option<DistanceTable>,
    pub weights: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub schedule: Option<Schedule>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateOutput {
    /// Whether the schedule is free of time conflicts. The score of an
    /// invalid schedule should not be trusted.
    pub valid: bool,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub valid: bool,
    pub conflicts: Vec<Conflict>,
}

type HandlerError = (StatusCode, String);

fn require<T>(value: Option<T>, name: &'static str) -> Result<T, EvaluationError> {
    value.ok_or(EvaluationError::MissingArgument(name))
}

fn reject(e: EvaluationError) -> HandlerError {
    let status = if e.is_caller_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    warn!("Rejected request: {}", e);
    (status, e.to_string())
}

/// Malformed sections (inverted time windows, NaN ratings) fail while the
/// body is deserialized; those are caller errors like any other.
fn reject_body(rejection: JsonRejection) -> HandlerError {
    let status = match rejection {
        JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
        _ => rejection.status(),
    };
    warn!("Rejected request body: {}", rejection.body_text());
    (status, rejection.body_text())
}

fn score(input: EvaluateRequest) -> Result<EvaluateOutput, EvaluationError> {
    let schedule = require(input.schedule, "schedule")?;
    let distances = require(input.distances, "distances")?;
    let weights = Weights::new(&require(input.weights, "weights")?)?;

    let breakdown = evaluator::evaluate(&schedule, &distances, &weights)?;
    Ok(EvaluateOutput {
        valid: evaluator::validate(&schedule),
        breakdown,
    })
}

async fn evaluate_handler(
    body: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateOutput>, HandlerError> {
    let Json(input) = body.map_err(reject_body)?;
    let output = score(input).map_err(reject)?;
    info!(
        "Evaluated schedule: score={:.4} valid={}",
        output.breakdown.score, output.valid
    );
    Ok(Json(output))
}

async fn validate_handler(
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateOutput>, HandlerError> {
    let Json(input) = body.map_err(reject_body)?;
    let schedule = require(input.schedule, "schedule").map_err(reject)?;
    let conflicts = evaluator::find_conflicts(&schedule);
    info!(
        "Validated schedule with {} sections, {} conflicts",
        schedule.len(),
        conflicts.len()
    );
    Ok(Json(ValidateOutput {
        valid: conflicts.is_empty(),
        conflicts,
    }))
}

async fn health_handler() -> &'static str {
    "ok"
}

pub fn app() -> Router {
    Router::new()
        .route("/v1/schedule/evaluate", post(evaluate_handler))
        .route("/v1/schedule/validate", post(validate_handler))
        .route("/health", get(health_handler))
}

pub async fn run_server(config: &Config) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app()).await
}
