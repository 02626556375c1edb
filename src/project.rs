use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Project category, used only for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    /// Incident repair.
    #[serde(rename = "Avería")]
    Averia,
    /// Construction work.
    #[serde(rename = "Obra")]
    Obra,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Averia => "Avería",
            ProjectType::Obra => "Obra",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client: String,
    #[serde(rename = "type")]
    pub kind: ProjectType,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        client: impl Into<String>,
        kind: ProjectType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: client.into(),
            kind,
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == task_id)
    }
}
