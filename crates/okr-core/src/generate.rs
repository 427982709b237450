//! Decompose an objective description into scheduled task drafts.
//!
//! Keyword-driven, not natural-language understanding: the first matching
//! rule wins, checked in a fixed order. Matching is a case-insensitive
//! substring test.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::model::{Id, NewTask, Priority, Task};
use crate::store::MemStore;

/// A task the generator wants created, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
}

/// Derive task drafts from an objective description.
///
/// Rules, first match wins:
/// 1. "article"/"blog": N write+research pairs on weekly deadlines,
///    research two days ahead of its write task. N defaults to 3.
/// 2. "project"/"coding": N projects on bi-weekly deadlines. N defaults
///    to 5.
/// 3. Otherwise a generic plan/execute/review breakdown.
pub fn plan_tasks(description: &str, now: DateTime<Utc>) -> Vec<TaskDraft> {
    let lowered = description.to_lowercase();
    let mut drafts = Vec::new();

    if lowered.contains("article") || lowered.contains("blog") {
        let count = deliverable_count(description, 3);
        for i in 1..=i64::from(count) {
            drafts.push(TaskDraft {
                title: format!("Write article {i}"),
                description: format!("Research, write, and publish article {i}"),
                deadline: now + Duration::days(7 * i),
                priority: if i <= 2 { Priority::High } else { Priority::Medium },
            });
            drafts.push(TaskDraft {
                title: format!("Research for article {i}"),
                description: format!("Gather information and sources for article {i}"),
                deadline: now + Duration::days(7 * i - 2),
                priority: Priority::Medium,
            });
        }
    } else if lowered.contains("project") || lowered.contains("coding") {
        let count = deliverable_count(description, 5);
        for i in 1..=i64::from(count) {
            drafts.push(TaskDraft {
                title: format!("Complete project {i}"),
                description: format!("Build and deploy project {i}"),
                deadline: now + Duration::days(14 * i),
                priority: if i <= 2 { Priority::High } else { Priority::Medium },
            });
        }
    } else {
        drafts.push(TaskDraft {
            title: "Plan and research".into(),
            description: "Break down the objective and research requirements".into(),
            deadline: now + Duration::days(7),
            priority: Priority::High,
        });
        drafts.push(TaskDraft {
            title: "Execute core work".into(),
            description: "Complete the main deliverables".into(),
            deadline: now + Duration::days(21),
            priority: Priority::High,
        });
        drafts.push(TaskDraft {
            title: "Review and finalize".into(),
            description: "Review progress and finalize deliverables".into(),
            deadline: now + Duration::days(28),
            priority: Priority::Medium,
        });
    }

    drafts
}

/// Extracted count, or the rule's default when the text has no usable
/// number. A literal zero counts as absent.
fn deliverable_count(description: &str, default: u32) -> u32 {
    match extract_count(description) {
        Some(0) | None => default,
        Some(n) => n,
    }
}

/// First contiguous digit run anywhere in the text. A year or other
/// unrelated figure wins over the intended deliverable count; known quirk,
/// kept deliberately. `None` when there are no digits or the run does not
/// fit a u32.
pub fn extract_count(text: &str) -> Option<u32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Plan drafts for an objective and persist them in emission order,
/// returning the created tasks.
pub fn generate_tasks(
    store: &MemStore,
    okr_id: Id,
    description: &str,
    now: DateTime<Utc>,
) -> Vec<Task> {
    let drafts = plan_tasks(description, now);
    debug!(okr_id, count = drafts.len(), "planned task drafts");
    drafts
        .into_iter()
        .map(|draft| {
            store.create_task(NewTask {
                okr_id,
                title: draft.title,
                description: Some(draft.description),
                deadline: draft.deadline,
                priority: draft.priority,
            })
        })
        .collect()
}
