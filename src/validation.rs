use std::collections::HashSet;
use std::fmt;

use crate::material::MaterialRequest;
use crate::project::Project;
use crate::task::Task;
use crate::user::User;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Reject numeric garbage before it reaches the scheduling core. The core
/// itself is total and never checks.
pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if task.id.trim().is_empty() {
        return Err(ValidationError::new("task requires a non-empty id"));
    }
    if task.name.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "task {} requires a non-empty name",
            task.id
        )));
    }
    if !task.estimated_hours.is_finite() {
        return Err(ValidationError::new(format!(
            "task {} has non-finite estimated_hours",
            task.id
        )));
    }
    if task.estimated_hours < 0.0 {
        return Err(ValidationError::new(format!(
            "task {} has negative estimated_hours {}",
            task.id, task.estimated_hours
        )));
    }
    if task.end_date < task.start_date {
        return Err(ValidationError::new(format!(
            "task {} ends {} before it starts {}",
            task.id, task.end_date, task.start_date
        )));
    }
    let mut seen = HashSet::with_capacity(task.assigned_user_ids.len());
    for user_id in &task.assigned_user_ids {
        if !seen.insert(user_id.as_str()) {
            return Err(ValidationError::new(format!(
                "task {} lists worker {} more than once",
                task.id, user_id
            )));
        }
    }
    Ok(())
}

pub fn validate_users(users: &[User]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(users.len());
    let mut seen_usernames = HashSet::with_capacity(users.len());
    for user in users {
        if user.id.trim().is_empty() {
            return Err(ValidationError::new("user requires a non-empty id"));
        }
        if !seen_ids.insert(user.id.as_str()) {
            return Err(ValidationError::new(format!("duplicate user id {}", user.id)));
        }
        if !seen_usernames.insert(user.username.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate username {}",
                user.username
            )));
        }
    }
    Ok(())
}

pub fn validate_projects(projects: &[Project]) -> Result<(), ValidationError> {
    let mut seen_projects = HashSet::with_capacity(projects.len());
    let mut seen_tasks = HashSet::new();
    for project in projects {
        if project.id.trim().is_empty() {
            return Err(ValidationError::new("project requires a non-empty id"));
        }
        if !seen_projects.insert(project.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate project id {}",
                project.id
            )));
        }
        for task in &project.tasks {
            validate_task(task)?;
            if task.project_id != project.id {
                return Err(ValidationError::new(format!(
                    "task {} claims project {} but lives in {}",
                    task.id, task.project_id, project.id
                )));
            }
            if !seen_tasks.insert(task.id.as_str()) {
                return Err(ValidationError::new(format!("duplicate task id {}", task.id)));
            }
        }
    }
    Ok(())
}

pub fn validate_materials(
    materials: &[MaterialRequest],
    projects: &[Project],
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(materials.len());
    for request in materials {
        if !seen.insert(request.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate material request id {}",
                request.id
            )));
        }
        let task_exists = projects
            .iter()
            .any(|project| project.find_task(&request.task_id).is_some());
        if !task_exists {
            return Err(ValidationError::new(format!(
                "material request {} references missing task {}",
                request.id, request.task_id
            )));
        }
    }
    Ok(())
}
