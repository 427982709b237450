use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use okr_core::api::{
    CompleteTaskRequest, CreateOkrResponse, StatusResponse, UpdateReminderStatusRequest,
};
use okr_core::generate::generate_tasks;
use okr_core::stats::{dashboard_stats, DashboardStats};
use okr_core::{
    Id, MemStore, NewOkr, NewReminder, NewTask, OkrWithTasks, Reminder, Task, TaskUpdate,
    TaskWithReminders,
};
use tracing::info;

use crate::config::DaemonConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
    pub config: DaemonConfig,
}

impl AppState {
    pub fn new(store: Arc<MemStore>, config: DaemonConfig) -> Self {
        Self { store, config }
    }
}

/// Domain failures surfaced over HTTP. Shape/type/enum validation happens in
/// the serde layer of the extractors before a handler runs.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/okrs", get(list_okrs).post(create_okr))
        .route("/api/okrs/{id}", get(get_okr))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task).patch(update_task))
        .route("/api/tasks/{id}/complete", post(complete_task))
        .route("/api/reminders", get(list_reminders).post(create_reminder))
        .route("/api/reminders/upcoming", get(upcoming_reminders))
        .route("/api/reminders/{id}/status", patch(update_reminder_status))
        .route("/api/dashboard/stats", get(stats))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_okrs(State(state): State<AppState>) -> Json<Vec<OkrWithTasks>> {
    Json(state.store.get_okrs())
}

async fn get_okr(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<OkrWithTasks>, ApiError> {
    let okr = state.store.get_okr(id).ok_or(ApiError::NotFound("OKR"))?;
    Ok(Json(okr))
}

async fn create_okr(
    State(state): State<AppState>,
    Json(req): Json<NewOkr>,
) -> Json<CreateOkrResponse> {
    let description = req.description.clone();
    let okr = state.store.create_okr(req);
    let tasks = generate_tasks(&state.store, okr.id, &description, Utc::now());
    info!(okr_id = okr.id, generated = tasks.len(), "objective created");
    Json(CreateOkrResponse { okr, tasks })
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.store.get_tasks())
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<Json<TaskWithReminders>, ApiError> {
    let task = state.store.get_task(id).ok_or(ApiError::NotFound("task"))?;
    Ok(Json(task))
}

async fn create_task(State(state): State<AppState>, Json(req): Json<NewTask>) -> Json<Task> {
    Json(state.store.create_task(req))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(updates): Json<TaskUpdate>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .store
        .update_task(id, updates)
        .ok_or(ApiError::NotFound("task"))?;
    Ok(Json(task))
}

async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(req): Json<CompleteTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .store
        .complete_task(id, req.proof_url)
        .ok_or(ApiError::NotFound("task"))?;
    info!(task_id = id, okr_id = task.okr_id, "task completed");
    Ok(Json(task))
}

async fn list_reminders(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    Json(state.store.get_reminders())
}

async fn create_reminder(
    State(state): State<AppState>,
    Json(req): Json<NewReminder>,
) -> Json<Reminder> {
    Json(state.store.create_reminder(req))
}

async fn upcoming_reminders(State(state): State<AppState>) -> Json<Vec<Reminder>> {
    Json(state.store.upcoming_reminders(Utc::now()))
}

async fn update_reminder_status(
    State(state): State<AppState>,
    Path(id): Path<Id>,
    Json(req): Json<UpdateReminderStatusRequest>,
) -> Json<StatusResponse> {
    state.store.update_reminder_status(id, req.status);
    Json(StatusResponse { success: true })
}

async fn stats(State(state): State<AppState>) -> Json<DashboardStats> {
    let now = Utc::now();
    let okrs = state.store.get_okrs();
    let tasks = state.store.get_tasks();
    let upcoming = state.store.upcoming_reminders(now);
    Json(dashboard_stats(&okrs, &tasks, upcoming.len(), now))
}
