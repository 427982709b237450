//! Request/response shapes shared between the daemon's HTTP layer and the
//! CLI client. The insert shapes in [`crate::model`] double as POST bodies;
//! only the shapes that differ from a stored entity live here.

use serde::{Deserialize, Serialize};

use crate::model::{Okr, ReminderStatus, Task};

/// Response to objective creation: the stored objective plus the tasks the
/// generator derived from its description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOkrResponse {
    pub okr: Okr,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteTaskRequest {
    #[serde(default)]
    pub proof_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReminderStatusRequest {
    pub status: ReminderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
}
