//! Integration tests for the in-memory entity store.

use chrono::{DateTime, Duration, Utc};
use okr_core::generate::generate_tasks;
use okr_core::seed::seed_sample_data;
use okr_core::{
    DeliveryMethod, MemStore, NewOkr, NewReminder, NewTask, OkrStatus, Priority, ReminderStatus,
    TaskStatus, TaskUpdate,
};

fn new_okr(title: &str) -> NewOkr {
    NewOkr {
        title: title.into(),
        description: "test objective".into(),
        target_date: Utc::now() + Duration::days(90),
        priority: Priority::High,
    }
}

fn new_task(okr_id: i64, title: &str) -> NewTask {
    NewTask {
        okr_id,
        title: title.into(),
        description: None,
        deadline: Utc::now() + Duration::days(7),
        priority: Priority::Medium,
    }
}

fn new_reminder(task_id: i64, offset_days: i64, now: DateTime<Utc>) -> NewReminder {
    NewReminder {
        task_id,
        message: format!("due in {offset_days} days"),
        delivery_method: DeliveryMethod::Dashboard,
        scheduled_for: now + Duration::days(offset_days),
    }
}

#[test]
fn create_okr_assigns_sequential_ids_and_defaults() {
    let store = MemStore::new();
    let first = store.create_okr(new_okr("one"));
    let second = store.create_okr(new_okr("two"));
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.status, OkrStatus::Active);
    assert_eq!(first.progress, 0);
}

#[test]
fn completing_tasks_recomputes_parent_progress() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("progress"));
    let ids: Vec<i64> = (0..4)
        .map(|i| store.create_task(new_task(okr.id, &format!("t{i}"))).id)
        .collect();

    store.complete_task(ids[0], None).unwrap();
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 25);

    store.complete_task(ids[1], None).unwrap();
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 50);
}

#[test]
fn completing_unknown_task_is_not_found_and_leaves_progress_alone() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("untouched"));
    store.create_task(new_task(okr.id, "t"));

    assert!(store.complete_task(999, None).is_none());
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 0);
}

#[test]
fn update_okr_progress_writes_through_and_ignores_unknown_ids() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("direct"));

    store.update_okr_progress(okr.id, 40);
    let fetched = store.get_okr(okr.id).unwrap();
    assert_eq!(fetched.okr.progress, 40);
    assert!(fetched.okr.updated_at >= okr.updated_at);

    // Unknown id is a silent no-op.
    store.update_okr_progress(999, 80);
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 40);
}

#[test]
fn okr_without_tasks_stays_at_zero_progress() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("empty"));
    let fetched = store.get_okr(okr.id).unwrap();
    assert_eq!(fetched.okr.progress, 0);
    assert_eq!(fetched.total_tasks, 0);
    assert_eq!(fetched.completed_tasks, 0);
}

#[test]
fn recompleting_overwrites_proof_and_completion_time() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("again"));
    let task = store.create_task(new_task(okr.id, "t"));

    let first = store
        .complete_task(task.id, Some("https://proof.example/1".into()))
        .unwrap();
    let second = store
        .complete_task(task.id, Some("https://proof.example/2".into()))
        .unwrap();

    assert_eq!(second.status, TaskStatus::Completed);
    assert_eq!(second.proof_url.as_deref(), Some("https://proof.example/2"));
    assert!(second.completed_at.unwrap() >= first.completed_at.unwrap());
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 100);

    // Completing without proof clears the previous link.
    let third = store.complete_task(task.id, None).unwrap();
    assert!(third.proof_url.is_none());
}

#[test]
fn update_task_merges_only_supplied_fields() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("merge"));
    let task = store.create_task(new_task(okr.id, "original"));

    let updated = store
        .update_task(
            task.id,
            TaskUpdate {
                title: Some("renamed".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.deadline, task.deadline);
    assert_eq!(updated.priority, task.priority);
    assert_eq!(updated.status, TaskStatus::Pending);
}

#[test]
fn update_task_unknown_id_is_not_found() {
    let store = MemStore::new();
    assert!(store.update_task(1, TaskUpdate::default()).is_none());
}

#[test]
fn update_task_status_does_not_recompute_progress() {
    let store = MemStore::new();
    let okr = store.create_okr(new_okr("quiet"));
    let task = store.create_task(new_task(okr.id, "t"));

    store
        .update_task(
            task.id,
            TaskUpdate {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .unwrap();

    // Only complete_task drives the aggregator.
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 0);
    assert_eq!(store.get_okr(okr.id).unwrap().completed_tasks, 1);
}

#[test]
fn get_okr_joins_its_own_tasks() {
    let store = MemStore::new();
    let first = store.create_okr(new_okr("mine"));
    let second = store.create_okr(new_okr("other"));
    store.create_task(new_task(first.id, "a"));
    store.create_task(new_task(second.id, "b"));
    store.create_task(new_task(first.id, "c"));

    let fetched = store.get_okr(first.id).unwrap();
    assert_eq!(fetched.total_tasks, 2);
    assert!(fetched.tasks.iter().all(|t| t.okr_id == first.id));

    assert!(store.get_okr(999).is_none());
}

#[test]
fn get_task_joins_its_own_reminders() {
    let store = MemStore::new();
    let now = Utc::now();
    let okr = store.create_okr(new_okr("reminders"));
    let task = store.create_task(new_task(okr.id, "t"));
    let other = store.create_task(new_task(okr.id, "u"));
    store.create_reminder(new_reminder(task.id, 1, now));
    store.create_reminder(new_reminder(other.id, 2, now));
    store.create_reminder(new_reminder(task.id, 3, now));

    let fetched = store.get_task(task.id).unwrap();
    assert_eq!(fetched.reminders.len(), 2);
    assert!(fetched.reminders.iter().all(|r| r.task_id == task.id));

    assert!(store.get_task(999).is_none());
}

#[test]
fn reminder_sent_transition_stamps_sent_at() {
    let store = MemStore::new();
    let now = Utc::now();
    let okr = store.create_okr(new_okr("stamps"));
    let task = store.create_task(new_task(okr.id, "t"));
    let reminder = store.create_reminder(new_reminder(task.id, 1, now));
    assert_eq!(reminder.status, ReminderStatus::Pending);
    assert!(reminder.sent_at.is_none());

    store.update_reminder_status(reminder.id, ReminderStatus::Viewed);
    let fetched = store.get_task(task.id).unwrap().reminders[0].clone();
    assert_eq!(fetched.status, ReminderStatus::Viewed);
    assert!(fetched.sent_at.is_none());

    store.update_reminder_status(reminder.id, ReminderStatus::Sent);
    let fetched = store.get_task(task.id).unwrap().reminders[0].clone();
    assert_eq!(fetched.status, ReminderStatus::Sent);
    assert!(fetched.sent_at.is_some());
}

#[test]
fn upcoming_reminders_are_capped_sorted_and_strictly_future() {
    let store = MemStore::new();
    let now = Utc::now();
    let okr = store.create_okr(new_okr("upcoming"));
    let task = store.create_task(new_task(okr.id, "t"));

    // Insert out of order, plus one in the past and one exactly at "now".
    for offset in (1..=12).rev() {
        store.create_reminder(new_reminder(task.id, offset, now));
    }
    store.create_reminder(new_reminder(task.id, -1, now));
    store.create_reminder(new_reminder(task.id, 0, now));

    let upcoming = store.upcoming_reminders(now);
    assert_eq!(upcoming.len(), 10);
    assert!(upcoming.iter().all(|r| r.scheduled_for > now));
    assert!(upcoming
        .windows(2)
        .all(|pair| pair[0].scheduled_for <= pair[1].scheduled_for));
    assert_eq!(upcoming[0].scheduled_for, now + Duration::days(1));
}

#[test]
fn seeded_counters_start_above_sample_rows() {
    let store = MemStore::new();
    seed_sample_data(&store);

    assert_eq!(store.get_okrs().len(), 2);
    assert_eq!(store.get_tasks().len(), 4);
    assert_eq!(store.get_reminders().len(), 3);

    assert_eq!(store.create_okr(new_okr("next")).id, 3);
    assert_eq!(store.create_task(new_task(3, "next")).id, 5);
    let reminder = store.create_reminder(new_reminder(5, 1, Utc::now()));
    assert_eq!(reminder.id, 4);
}

#[test]
fn mark_due_reminders_sent_flips_only_due_pending() {
    let store = MemStore::new();
    let now = Utc::now();
    let okr = store.create_okr(new_okr("sweep"));
    let task = store.create_task(new_task(okr.id, "t"));

    let due = store.create_reminder(new_reminder(task.id, -1, now));
    let future = store.create_reminder(new_reminder(task.id, 1, now));
    let viewed = store.create_reminder(new_reminder(task.id, -2, now));
    store.update_reminder_status(viewed.id, ReminderStatus::Viewed);

    assert_eq!(store.mark_due_reminders_sent(now), 1);

    let by_id = |id: i64| {
        store
            .get_reminders()
            .into_iter()
            .find(|r| r.id == id)
            .unwrap()
    };
    assert_eq!(by_id(due.id).status, ReminderStatus::Sent);
    assert_eq!(by_id(due.id).sent_at, Some(now));
    assert_eq!(by_id(future.id).status, ReminderStatus::Pending);
    assert_eq!(by_id(viewed.id).status, ReminderStatus::Viewed);
}

#[test]
fn publish_articles_end_to_end() {
    let store = MemStore::new();
    let okr = store.create_okr(NewOkr {
        title: "Publish 3 AI Articles".into(),
        description: "write 3 articles".into(),
        target_date: Utc::now() + Duration::days(120),
        priority: Priority::High,
    });

    let tasks = generate_tasks(&store, okr.id, "write 3 articles", Utc::now());
    assert_eq!(tasks.len(), 6);
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 0);

    for task in tasks.iter().take(3) {
        store.complete_task(task.id, None).unwrap();
    }
    assert_eq!(store.get_okr(okr.id).unwrap().okr.progress, 50);
}
