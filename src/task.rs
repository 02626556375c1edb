use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::WorkCalendar;
use crate::scheduling;
use crate::user::UserRole;

/// Lifecycle of a work package: Pendiente → En Curso → Completado → Revisado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "En Curso")]
    InProgress,
    #[serde(rename = "Completado")]
    Completed,
    #[serde(rename = "Revisado")]
    Reviewed,
}

/// Transitions an operario may perform on their own tasks. Completado →
/// Revisado is the master's sign-off and is absent on purpose.
const OPERARIO_TRANSITIONS: [(TaskStatus, TaskStatus); 2] = [
    (TaskStatus::Pending, TaskStatus::InProgress),
    (TaskStatus::InProgress, TaskStatus::Completed),
];

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendiente",
            TaskStatus::InProgress => "En Curso",
            TaskStatus::Completed => "Completado",
            TaskStatus::Reviewed => "Revisado",
        }
    }

    /// A live task still blocks scheduling; finished work does not.
    pub fn is_live(self) -> bool {
        !matches!(self, TaskStatus::Completed | TaskStatus::Reviewed)
    }

    /// Whether `role` may move a task from `self` to `next`. The master
    /// role may set any status directly; operarios get the linear path up
    /// to Completado.
    pub fn can_transition(self, next: TaskStatus, role: UserRole) -> bool {
        if role == UserRole::Master {
            return true;
        }
        OPERARIO_TRANSITIONS.contains(&(self, next))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    /// Total effort across all assignees, in hours. Fractional values are
    /// fine (e.g. 4.5).
    pub estimated_hours: f64,
    /// Always derived from `(start_date, estimated_hours, assignees)` via
    /// [`Task::recompute_end_date`]; never set independently.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub assigned_user_ids: Vec<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        estimated_hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            description: String::new(),
            start_date,
            estimated_hours,
            end_date: start_date,
            assigned_user_ids: Vec::new(),
            status: TaskStatus::Pending,
            observations: None,
        }
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_user_ids.iter().any(|id| id == user_id)
    }

    /// Re-derive `end_date` from the current start, effort, and assignees.
    ///
    /// An unassigned task is sized as if one worker did it, so the span
    /// stays visible on the timeline.
    pub fn recompute_end_date(&mut self, calendar: &WorkCalendar) {
        let worker_count = self.assigned_user_ids.len().max(1);
        self.end_date =
            scheduling::compute_end_date(calendar, self.start_date, self.estimated_hours, worker_count);
    }
}
