//! On-demand summary metrics for the dashboard header.
//!
//! Nothing here is cached: week and month boundaries are derived from the
//! caller-supplied instant on every call, so two requests straddling a
//! boundary can legitimately disagree.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{OkrStatus, OkrWithTasks, Task, TaskStatus};
use crate::progress::progress_pct;

/// Completed/total counts for a reporting window, with a rounded percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_okrs: usize,
    pub completed_tasks: usize,
    pub overall_progress: u8,
    pub weekly_progress: PeriodProgress,
    pub monthly_progress: PeriodProgress,
    pub upcoming_reminders: usize,
}

/// Most recent Sunday at 00:00 UTC (Sunday itself counts).
pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let days_from_sunday = i64::from(now.weekday().num_days_from_sunday());
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    midnight - Duration::days(days_from_sunday)
}

/// First day of the current month at 00:00 UTC.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive());
    first.and_time(NaiveTime::MIN).and_utc()
}

/// Derive the dashboard summary from store snapshots. `upcoming_reminders`
/// is the count the reminder query returned for the same instant.
pub fn dashboard_stats(
    okrs: &[OkrWithTasks],
    tasks: &[Task],
    upcoming_reminders: usize,
    now: DateTime<Utc>,
) -> DashboardStats {
    let active_okrs = okrs
        .iter()
        .filter(|o| o.okr.status == OkrStatus::Active)
        .count();
    let completed_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    let overall_progress = if okrs.is_empty() {
        0
    } else {
        let sum: u32 = okrs.iter().map(|o| u32::from(o.okr.progress)).sum();
        (f64::from(sum) / okrs.len() as f64).round() as u8
    };

    DashboardStats {
        active_okrs,
        completed_tasks,
        overall_progress,
        weekly_progress: period_progress(tasks, week_start(now)),
        monthly_progress: period_progress(tasks, month_start(now)),
        upcoming_reminders,
    }
}

fn period_progress(tasks: &[Task], since: DateTime<Utc>) -> PeriodProgress {
    let total = tasks.iter().filter(|t| t.created_at >= since).count();
    let completed = tasks
        .iter()
        .filter(|t| t.created_at >= since && t.status == TaskStatus::Completed)
        .count();
    PeriodProgress {
        completed,
        total,
        percentage: progress_pct(completed, total),
    }
}
