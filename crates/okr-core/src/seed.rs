//! Demo data for the dashboard walkthrough: two objectives, four tasks,
//! three reminders. Timestamps are relative to "now" so the seed stays
//! meaningful regardless of when the daemon starts.

use chrono::{Duration, Utc};

use crate::model::{
    DeliveryMethod, Okr, OkrStatus, Priority, Reminder, ReminderStatus, Task, TaskStatus,
};
use crate::store::MemStore;

/// Inserts the sample rows with fixed ids, then advances the id counters
/// past them so freshly created entities never collide with the seed.
pub fn seed_sample_data(store: &MemStore) {
    let now = Utc::now();
    let mut inner = store.inner.lock().unwrap();

    inner.okrs.insert(
        1,
        Okr {
            id: 1,
            title: "Publish 3 AI Articles by Q4".into(),
            description: "Write and publish 3 comprehensive articles about AI trends, \
                          applications, and future predictions"
                .into(),
            target_date: now + Duration::days(120),
            priority: Priority::High,
            status: OkrStatus::Active,
            progress: 75,
            created_at: now,
            updated_at: now,
        },
    );
    inner.okrs.insert(
        2,
        Okr {
            id: 2,
            title: "Complete 5 Coding Projects".into(),
            description: "Build and deploy 5 full-stack applications using modern technologies"
                .into(),
            target_date: now + Duration::days(100),
            priority: Priority::Medium,
            status: OkrStatus::Active,
            progress: 60,
            created_at: now,
            updated_at: now,
        },
    );

    let tasks = [
        Task {
            id: 1,
            okr_id: 1,
            title: "Write 500 words for Article 1".into(),
            description: Some("Focus on AI in healthcare applications".into()),
            deadline: now + Duration::days(1),
            priority: Priority::High,
            status: TaskStatus::Pending,
            completed_at: None,
            proof_url: None,
            created_at: now,
        },
        Task {
            id: 2,
            okr_id: 1,
            title: "Research AI trends for Article 2".into(),
            description: Some("Gather latest information on AI developments".into()),
            deadline: now + Duration::days(3),
            priority: Priority::Medium,
            status: TaskStatus::Pending,
            completed_at: None,
            proof_url: None,
            created_at: now,
        },
        Task {
            id: 3,
            okr_id: 1,
            title: "Complete React project setup".into(),
            description: Some("Initialize React project with TypeScript".into()),
            deadline: now - Duration::days(1),
            priority: Priority::Low,
            status: TaskStatus::Completed,
            completed_at: Some(now),
            proof_url: Some("https://github.com/user/react-setup".into()),
            created_at: now,
        },
        Task {
            id: 4,
            okr_id: 1,
            title: "Update LinkedIn profile".into(),
            description: Some("Add new skills and recent projects".into()),
            deadline: now + Duration::days(7),
            priority: Priority::Low,
            status: TaskStatus::Pending,
            completed_at: None,
            proof_url: None,
            created_at: now,
        },
    ];
    for task in tasks {
        inner.tasks.insert(task.id, task);
    }

    let reminders = [
        Reminder {
            id: 1,
            task_id: 1,
            message: "Article 1 Deadline - Write 500 words - due tomorrow".into(),
            delivery_method: DeliveryMethod::Email,
            status: ReminderStatus::Sent,
            scheduled_for: now - Duration::hours(2),
            sent_at: Some(now - Duration::hours(2)),
            created_at: now,
        },
        Reminder {
            id: 2,
            task_id: 2,
            message: "Research Task - AI trends research - due in 3 days".into(),
            delivery_method: DeliveryMethod::Dashboard,
            status: ReminderStatus::Viewed,
            scheduled_for: now - Duration::days(1),
            sent_at: Some(now - Duration::days(1)),
            created_at: now,
        },
        Reminder {
            id: 3,
            task_id: 4,
            message: "Weekly Review - Review progress and plan next week".into(),
            delivery_method: DeliveryMethod::Dashboard,
            status: ReminderStatus::Pending,
            scheduled_for: now + Duration::days(3),
            sent_at: None,
            created_at: now,
        },
    ];
    for reminder in reminders {
        inner.reminders.insert(reminder.id, reminder);
    }

    inner.next_okr_id = 3;
    inner.next_task_id = 5;
    inner.next_reminder_id = 4;
}
