use std::time::Duration;

use chrono::Utc;
use tokio::time::interval;
use tracing::{debug, info};

use crate::api::AppState;

/// Periodically advances due pending reminders to sent. "Sending" is a
/// status transition only; no delivery channel is wired up.
pub fn spawn_reminder_sweep(state: AppState) {
    let secs = state.config.reminder_sweep_seconds;
    if secs == 0 {
        debug!("reminder sweep disabled");
        return;
    }
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(secs));
        loop {
            tick.tick().await;
            let advanced = state.store.mark_due_reminders_sent(Utc::now());
            if advanced > 0 {
                info!(advanced, "marked due reminders as sent");
            }
        }
    });
}
