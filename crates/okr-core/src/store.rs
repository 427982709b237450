use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::model::{
    Id, NewOkr, NewReminder, NewTask, Okr, OkrStatus, OkrWithTasks, Reminder, ReminderStatus,
    Task, TaskStatus, TaskUpdate, TaskWithReminders,
};
use crate::progress::progress_pct;

/// Volatile in-memory entity store. All state is lost on process exit.
///
/// One mutex guards the three maps so that read-modify-write sequences never
/// interleave; in particular [`MemStore::complete_task`] mutates the task and
/// recomputes the parent objective's progress under a single lock
/// acquisition.
#[derive(Default)]
pub struct MemStore {
    pub(crate) inner: Mutex<Inner>,
}

pub(crate) struct Inner {
    pub(crate) okrs: BTreeMap<Id, Okr>,
    pub(crate) tasks: BTreeMap<Id, Task>,
    pub(crate) reminders: BTreeMap<Id, Reminder>,
    pub(crate) next_okr_id: Id,
    pub(crate) next_task_id: Id,
    pub(crate) next_reminder_id: Id,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            okrs: BTreeMap::new(),
            tasks: BTreeMap::new(),
            reminders: BTreeMap::new(),
            next_okr_id: 1,
            next_task_id: 1,
            next_reminder_id: 1,
        }
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_okr(&self, new: NewOkr) -> Okr {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_okr_id;
        inner.next_okr_id += 1;
        let now = Utc::now();
        let okr = Okr {
            id,
            title: new.title,
            description: new.description,
            target_date: new.target_date,
            priority: new.priority,
            status: OkrStatus::Active,
            progress: 0,
            created_at: now,
            updated_at: now,
        };
        inner.okrs.insert(id, okr.clone());
        okr
    }

    /// Every objective, each joined with its tasks and completion counts.
    pub fn get_okrs(&self) -> Vec<OkrWithTasks> {
        let inner = self.inner.lock().unwrap();
        inner
            .okrs
            .values()
            .map(|okr| join_tasks(&inner, okr))
            .collect()
    }

    pub fn get_okr(&self, id: Id) -> Option<OkrWithTasks> {
        let inner = self.inner.lock().unwrap();
        inner.okrs.get(&id).map(|okr| join_tasks(&inner, okr))
    }

    /// Overwrites the stored progress and bumps `updated_at`. No-op for an
    /// absent id.
    pub fn update_okr_progress(&self, id: Id, progress: u8) {
        let mut inner = self.inner.lock().unwrap();
        set_progress(&mut inner, id, progress);
    }

    pub fn create_task(&self, new: NewTask) -> Task {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_task_id;
        inner.next_task_id += 1;
        let task = Task {
            id,
            okr_id: new.okr_id,
            title: new.title,
            description: new.description,
            deadline: new.deadline,
            priority: new.priority,
            status: TaskStatus::Pending,
            completed_at: None,
            proof_url: None,
            created_at: Utc::now(),
        };
        inner.tasks.insert(id, task.clone());
        task
    }

    pub fn get_tasks(&self) -> Vec<Task> {
        let inner = self.inner.lock().unwrap();
        inner.tasks.values().cloned().collect()
    }

    pub fn get_tasks_by_okr(&self, okr_id: Id) -> Vec<Task> {
        let inner = self.inner.lock().unwrap();
        inner
            .tasks
            .values()
            .filter(|task| task.okr_id == okr_id)
            .cloned()
            .collect()
    }

    pub fn get_task(&self, id: Id) -> Option<TaskWithReminders> {
        let inner = self.inner.lock().unwrap();
        let task = inner.tasks.get(&id)?.clone();
        let reminders = inner
            .reminders
            .values()
            .filter(|reminder| reminder.task_id == id)
            .cloned()
            .collect();
        Some(TaskWithReminders { task, reminders })
    }

    /// Shallow merge of the supplied fields. Does not touch the parent
    /// objective's progress, even when `status` is set to completed.
    pub fn update_task(&self, id: Id, updates: TaskUpdate) -> Option<Task> {
        let mut inner = self.inner.lock().unwrap();
        let task = inner.tasks.get_mut(&id)?;
        if let Some(title) = updates.title {
            task.title = title;
        }
        if let Some(description) = updates.description {
            task.description = Some(description);
        }
        if let Some(deadline) = updates.deadline {
            task.deadline = deadline;
        }
        if let Some(priority) = updates.priority {
            task.priority = priority;
        }
        if let Some(status) = updates.status {
            task.status = status;
        }
        if let Some(completed_at) = updates.completed_at {
            task.completed_at = Some(completed_at);
        }
        if let Some(proof_url) = updates.proof_url {
            task.proof_url = Some(proof_url);
        }
        Some(task.clone())
    }

    /// Marks the task completed and recomputes the parent objective's
    /// progress before returning, all under one lock acquisition.
    ///
    /// Re-completing an already-completed task is allowed and overwrites
    /// `completed_at` and `proof_url`.
    pub fn complete_task(&self, id: Id, proof_url: Option<String>) -> Option<Task> {
        let mut inner = self.inner.lock().unwrap();
        let okr_id = {
            let task = inner.tasks.get_mut(&id)?;
            task.status = TaskStatus::Completed;
            task.completed_at = Some(Utc::now());
            task.proof_url = proof_url;
            task.okr_id
        };

        let completed = inner
            .tasks
            .values()
            .filter(|t| t.okr_id == okr_id && t.status == TaskStatus::Completed)
            .count();
        let total = inner.tasks.values().filter(|t| t.okr_id == okr_id).count();
        set_progress(&mut inner, okr_id, progress_pct(completed, total));

        inner.tasks.get(&id).cloned()
    }

    pub fn create_reminder(&self, new: NewReminder) -> Reminder {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_reminder_id;
        inner.next_reminder_id += 1;
        let reminder = Reminder {
            id,
            task_id: new.task_id,
            message: new.message,
            delivery_method: new.delivery_method,
            status: ReminderStatus::Pending,
            scheduled_for: new.scheduled_for,
            sent_at: None,
            created_at: Utc::now(),
        };
        inner.reminders.insert(id, reminder.clone());
        reminder
    }

    pub fn get_reminders(&self) -> Vec<Reminder> {
        let inner = self.inner.lock().unwrap();
        inner.reminders.values().cloned().collect()
    }

    /// Reminders scheduled strictly after `now`, soonest first, capped at 10.
    pub fn upcoming_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        let inner = self.inner.lock().unwrap();
        let mut upcoming: Vec<Reminder> = inner
            .reminders
            .values()
            .filter(|reminder| reminder.scheduled_for > now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|reminder| reminder.scheduled_for);
        upcoming.truncate(10);
        upcoming
    }

    /// Sets the status; a transition to sent also stamps `sent_at`. No-op
    /// for an absent id.
    pub fn update_reminder_status(&self, id: Id, status: ReminderStatus) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reminder) = inner.reminders.get_mut(&id) {
            reminder.status = status;
            if status == ReminderStatus::Sent {
                reminder.sent_at = Some(Utc::now());
            }
        }
    }

    /// Advances every pending reminder whose scheduled time has passed to
    /// sent, stamping `sent_at`. Returns how many were advanced.
    pub fn mark_due_reminders_sent(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.inner.lock().unwrap();
        let mut advanced = 0;
        for reminder in inner.reminders.values_mut() {
            if reminder.status == ReminderStatus::Pending && reminder.scheduled_for <= now {
                reminder.status = ReminderStatus::Sent;
                reminder.sent_at = Some(now);
                advanced += 1;
            }
        }
        advanced
    }
}

fn set_progress(inner: &mut Inner, id: Id, progress: u8) {
    if let Some(okr) = inner.okrs.get_mut(&id) {
        okr.progress = progress;
        okr.updated_at = Utc::now();
    }
}

fn join_tasks(inner: &Inner, okr: &Okr) -> OkrWithTasks {
    let tasks: Vec<Task> = inner
        .tasks
        .values()
        .filter(|task| task.okr_id == okr.id)
        .cloned()
        .collect();
    let completed_tasks = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Completed)
        .count();
    let total_tasks = tasks.len();
    OkrWithTasks {
        okr: okr.clone(),
        tasks,
        completed_tasks,
        total_tasks,
    }
}
