use crate::{error::AppError, AppState};
use analytics::DashboardMetrics;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use core_types::{LogRequest, Record, RecordFilter, Settings};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub log: Record,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDueResponse {
    pub date: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Settings,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub metrics: DashboardMetrics,
}

/// # GET /api/logs
/// Lists logs, newest first. Accepts `type`, `from` and `to` (inclusive).
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> Result<Json<LogsResponse>, AppError> {
    let logs = state.ledger.list_logs(&filter).await?;
    Ok(Json(LogsResponse { logs }))
}

/// # POST /api/logs
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogRequest>,
) -> Result<(StatusCode, Json<LogResponse>), AppError> {
    let log = state.ledger.create_log(request).await?;
    Ok((StatusCode::CREATED, Json(LogResponse { message: None, log })))
}

/// # GET /api/logs/:id
pub async fn get_log(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<LogResponse>, AppError> {
    let log = state.ledger.get_log(id).await?;
    Ok(Json(LogResponse { message: None, log }))
}

/// # PUT /api/logs/:id
pub async fn update_log(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<LogRequest>,
) -> Result<Json<LogResponse>, AppError> {
    let log = state.ledger.update_log(id, request).await?;
    Ok(Json(LogResponse {
        message: Some("Log updated successfully".to_string()),
        log,
    }))
}

/// # DELETE /api/logs/:id
pub async fn delete_log(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, AppError> {
    state.ledger.delete_log(id).await?;
    Ok(Json(MessageResponse {
        message: "Log deleted successfully".to_string(),
    }))
}

/// # GET /api/logs/:id/amount-due
/// What was owed as of the log's date.
pub async fn amount_due(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AmountDueResponse>, AppError> {
    let (date, amount_due) = state.ledger.amount_due_as_of(id).await?;
    Ok(Json(AmountDueResponse { date, amount_due }))
}

/// # GET /api/settings
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.ledger.settings().await?;
    Ok(Json(SettingsResponse { settings }))
}

/// # PUT /api/settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<Settings>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = state.ledger.update_settings(settings).await?;
    Ok(Json(SettingsResponse { settings }))
}

/// # GET /api/dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, AppError> {
    let metrics = state.ledger.dashboard().await?;
    Ok(Json(DashboardResponse { metrics }))
}
