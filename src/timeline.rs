use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::project::Project;
use crate::task::Task;

/// One bar on the Gantt view. Entries are derived from live task data on
/// demand, never stored, so a deleted task cannot leave an orphan behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub task_id: String,
    pub project_id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl TimelineEntry {
    pub fn for_task(task: &Task) -> Self {
        Self {
            id: format!("timeline-{}", task.id),
            task_id: task.id.clone(),
            project_id: task.project_id.clone(),
            title: task.name.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
        }
    }
}

/// Flatten every task of every project into timeline entries, in project
/// order.
pub fn build_timeline(projects: &[Project]) -> Vec<TimelineEntry> {
    projects
        .iter()
        .flat_map(|project| project.tasks.iter().map(TimelineEntry::for_task))
        .collect()
}
