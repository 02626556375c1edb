use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Warehouse handling state of a requisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Preparación")]
    Preparing,
    #[serde(rename = "Listo")]
    Ready,
}

impl MaterialStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialStatus::Pending => "Pendiente",
            MaterialStatus::Preparing => "En Preparación",
            MaterialStatus::Ready => "Listo",
        }
    }
}

/// Material requisition raised from a task and routed to warehouse staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRequest {
    pub id: String,
    pub task_id: String,
    /// Denormalized for easier querying.
    pub project_id: String,
    pub requested_by_user_id: String,
    pub items: Vec<String>,
    pub status: MaterialStatus,
    pub created_at: DateTime<Utc>,
    /// Warehouse worker preparing the request, once someone picks it up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handled_by_user_id: Option<String>,
}

impl MaterialRequest {
    pub fn new(
        id: impl Into<String>,
        task_id: impl Into<String>,
        project_id: impl Into<String>,
        requested_by_user_id: impl Into<String>,
        items: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            project_id: project_id.into(),
            requested_by_user_id: requested_by_user_id.into(),
            items,
            status: MaterialStatus::Pending,
            created_at,
            handled_by_user_id: None,
        }
    }
}
