use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity id. Per-entity monotonically increasing counter, never reused.
pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OkrStatus {
    Active,
    Completed,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Completed,
}

/// Intended lifecycle is pending -> sent -> viewed; the store does not
/// enforce monotonicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Sent,
    Viewed,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Email,
    Dashboard,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unrecognized {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.into(),
            }),
        }
    }
}

impl FromStr for ReminderStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "sent" => Ok(Self::Sent),
            "viewed" => Ok(Self::Viewed),
            "skipped" => Ok(Self::Skipped),
            other => Err(ParseEnumError {
                kind: "reminder status",
                value: other.into(),
            }),
        }
    }
}

/// An objective. `progress` is recomputed from its tasks' completion state
/// whenever one of them completes; it is 0 while the objective has no tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Okr {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub target_date: DateTime<Utc>,
    pub priority: Priority,
    pub status: OkrStatus,
    /// 0..=100.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An atomic actionable unit belonging to exactly one objective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub okr_id: Id,
    pub title: String,
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub completed_at: Option<DateTime<Utc>>,
    /// Optional evidence link supplied on completion.
    pub proof_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled notification tied to a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Id,
    pub task_id: Id,
    pub message: String,
    pub delivery_method: DeliveryMethod,
    pub status: ReminderStatus,
    pub scheduled_for: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Objective joined with its tasks and completion counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkrWithTasks {
    #[serde(flatten)]
    pub okr: Okr,
    pub tasks: Vec<Task>,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

/// Task joined with its reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskWithReminders {
    #[serde(flatten)]
    pub task: Task,
    pub reminders: Vec<Reminder>,
}

/// Insert shape for an objective; id, status, progress, and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOkr {
    pub title: String,
    pub description: String,
    pub target_date: DateTime<Utc>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub okr_id: Id,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReminder {
    pub task_id: Id,
    pub message: String,
    pub delivery_method: DeliveryMethod,
    pub scheduled_for: DateTime<Utc>,
}

/// Field-level partial update for a task. `None` leaves a field unchanged;
/// nullable fields cannot be cleared back to null through this shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub completed_at: Option<DateTime<Utc>>,
    pub proof_url: Option<String>,
}
