use std::fmt;

use crate::calendar::WorkCalendar;
use crate::material::MaterialRequest;
use crate::project::Project;
use crate::scheduling;
use crate::task::{Task, TaskStatus};
use crate::timeline::{self, TimelineEntry};
use crate::user::{User, UserRole};
use crate::validation::{self, ValidationError};

#[derive(Debug)]
pub enum WorkforceError {
    UserNotFound(String),
    ProjectNotFound(String),
    TaskNotFound(String),
    MaterialNotFound(String),
    ForbiddenTransition {
        from: TaskStatus,
        to: TaskStatus,
        role: UserRole,
    },
    Invalid(ValidationError),
}

impl fmt::Display for WorkforceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkforceError::UserNotFound(id) => write!(f, "user {id} not found"),
            WorkforceError::ProjectNotFound(id) => write!(f, "project {id} not found"),
            WorkforceError::TaskNotFound(id) => write!(f, "task {id} not found"),
            WorkforceError::MaterialNotFound(id) => write!(f, "material request {id} not found"),
            WorkforceError::ForbiddenTransition { from, to, role } => write!(
                f,
                "{:?} may not move a task from {} to {}",
                role,
                from.as_str(),
                to.as_str()
            ),
            WorkforceError::Invalid(err) => write!(f, "invalid data: {err}"),
        }
    }
}

impl std::error::Error for WorkforceError {}

impl From<ValidationError> for WorkforceError {
    fn from(value: ValidationError) -> Self {
        WorkforceError::Invalid(value)
    }
}

pub type WorkforceResult<T> = Result<T, WorkforceError>;

/// The in-memory snapshot of the whole system: workers, projects with their
/// tasks, and warehouse requisitions.
///
/// All mutations go through methods here, which keeps the one invariant
/// that matters intact: a task's `end_date` is re-derived from its start,
/// effort, and assignee count on every change. The scheduling functions in
/// [`crate::scheduling`] only ever borrow this state.
#[derive(Debug, Clone, Default)]
pub struct Workforce {
    users: Vec<User>,
    projects: Vec<Project>,
    materials: Vec<MaterialRequest>,
    calendar: WorkCalendar,
}

impl Workforce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a snapshot from persisted parts. Spans are re-derived so a
    /// hand-edited file cannot smuggle in an inconsistent `end_date`.
    pub fn from_parts(
        users: Vec<User>,
        projects: Vec<Project>,
        materials: Vec<MaterialRequest>,
    ) -> WorkforceResult<Self> {
        let mut workforce = Self {
            users,
            projects,
            materials,
            calendar: WorkCalendar::default(),
        };
        for project in &mut workforce.projects {
            for task in &mut project.tasks {
                task.recompute_end_date(&workforce.calendar);
            }
        }
        workforce.validate()?;
        Ok(workforce)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_users(&self.users)?;
        validation::validate_projects(&self.projects)?;
        validation::validate_materials(&self.materials, &self.projects)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn materials(&self) -> &[MaterialRequest] {
        &self.materials
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    // ---- users ----

    pub fn add_user(&mut self, user: User) -> WorkforceResult<User> {
        let mut next = self.users.clone();
        next.push(user.clone());
        validation::validate_users(&next)?;
        self.users = next;
        Ok(user)
    }

    pub fn remove_user(&mut self, user_id: &str) -> WorkforceResult<()> {
        let before = self.users.len();
        self.users.retain(|user| user.id != user_id);
        if self.users.len() == before {
            return Err(WorkforceError::UserNotFound(user_id.to_string()));
        }
        Ok(())
    }

    /// Plaintext credential lookup. Accounts without a stored password
    /// accept anything.
    pub fn login(&self, username: &str, password: &str) -> Option<&User> {
        self.users
            .iter()
            .find(|user| user.username == username && user.accepts_password(password))
    }

    // ---- projects ----

    pub fn create_project(&mut self, mut project: Project) -> WorkforceResult<Project> {
        for task in &mut project.tasks {
            task.project_id = project.id.clone();
            task.recompute_end_date(&self.calendar);
        }
        let mut next = self.projects.clone();
        next.push(project.clone());
        validation::validate_projects(&next)?;
        self.projects = next;
        Ok(project)
    }

    /// Replace a project wholesale, keeping its id. Task spans are
    /// re-derived, same as on create.
    pub fn update_project(&mut self, project_id: &str, mut payload: Project) -> WorkforceResult<Project> {
        payload.id = project_id.to_string();
        for task in &mut payload.tasks {
            task.project_id = project_id.to_string();
            task.recompute_end_date(&self.calendar);
        }

        let index = self
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;

        let mut next = self.projects.clone();
        next[index] = payload.clone();
        validation::validate_projects(&next)?;
        self.projects = next;
        // Requisitions whose tasks disappeared with the update go too.
        self.prune_orphan_materials();
        Ok(payload)
    }

    /// Delete a project and everything hanging off it: its tasks go with
    /// the aggregate, their requisitions are pruned, and the timeline is
    /// derived so no entry can survive.
    pub fn delete_project(&mut self, project_id: &str) -> WorkforceResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;
        let removed = self.projects.remove(index);
        self.materials.retain(|request| request.project_id != project_id);
        Ok(removed)
    }

    pub fn find_project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == project_id)
    }

    pub fn averias(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.kind == crate::project::ProjectType::Averia)
            .collect()
    }

    pub fn obras(&self) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|project| project.kind == crate::project::ProjectType::Obra)
            .collect()
    }

    // ---- tasks ----

    /// Add a task to a project. The span is derived before anything else
    /// happens, then every assignee is re-checked against it. The returned
    /// conflict list is advisory; the task is saved either way.
    pub fn add_task(
        &mut self,
        project_id: &str,
        mut task: Task,
    ) -> WorkforceResult<(Project, Vec<String>)> {
        task.project_id = project_id.to_string();
        task.recompute_end_date(&self.calendar);
        validation::validate_task(&task)?;

        let index = self
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;

        let mut next = self.projects.clone();
        next[index].tasks.push(task.clone());
        validation::validate_projects(&next)?;
        self.projects = next;

        let conflicts = scheduling::conflicting_workers(&self.projects, &self.users, &task);
        Ok((self.projects[index].clone(), conflicts))
    }

    /// Update a task in place. Re-assignment and rescheduling both land
    /// here; the span is re-derived with the updated worker count, then
    /// every currently assigned worker is re-checked, not just the one
    /// that changed, since the span moved for all of them.
    pub fn update_task(
        &mut self,
        project_id: &str,
        task_id: &str,
        mut payload: Task,
    ) -> WorkforceResult<(Project, Vec<String>)> {
        payload.id = task_id.to_string();
        payload.project_id = project_id.to_string();
        payload.recompute_end_date(&self.calendar);
        validation::validate_task(&payload)?;

        let index = self
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;
        let slot = self.projects[index]
            .tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| WorkforceError::TaskNotFound(task_id.to_string()))?;

        self.projects[index].tasks[slot] = payload.clone();

        let conflicts = scheduling::conflicting_workers(&self.projects, &self.users, &payload);
        Ok((self.projects[index].clone(), conflicts))
    }

    pub fn remove_task(&mut self, project_id: &str, task_id: &str) -> WorkforceResult<Project> {
        let index = self
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;

        let before = self.projects[index].tasks.len();
        self.projects[index].tasks.retain(|task| task.id != task_id);
        if self.projects[index].tasks.len() == before {
            return Err(WorkforceError::TaskNotFound(task_id.to_string()));
        }
        self.materials.retain(|request| request.task_id != task_id);
        Ok(self.projects[index].clone())
    }

    /// Move a task through its lifecycle, honoring the transition table:
    /// operarios walk Pendiente → En Curso → Completado, only a master
    /// signs off to Revisado (and may set any status outright).
    pub fn set_task_status(
        &mut self,
        project_id: &str,
        task_id: &str,
        next: TaskStatus,
        role: UserRole,
    ) -> WorkforceResult<Task> {
        let calendar = self.calendar.clone();
        let project = self
            .projects
            .iter_mut()
            .find(|project| project.id == project_id)
            .ok_or_else(|| WorkforceError::ProjectNotFound(project_id.to_string()))?;
        let task = project
            .find_task_mut(task_id)
            .ok_or_else(|| WorkforceError::TaskNotFound(task_id.to_string()))?;

        if !task.status.can_transition(next, role) {
            return Err(WorkforceError::ForbiddenTransition {
                from: task.status,
                to: next,
                role,
            });
        }
        task.status = next;
        task.recompute_end_date(&calendar);
        Ok(task.clone())
    }

    pub fn find_task(&self, task_id: &str) -> Option<(&Project, &Task)> {
        self.projects.iter().find_map(|project| {
            project.find_task(task_id).map(|task| (project, task))
        })
    }

    pub fn all_tasks(&self) -> Vec<&Task> {
        self.projects
            .iter()
            .flat_map(|project| project.tasks.iter())
            .collect()
    }

    pub fn tasks_for_user(&self, user_id: &str) -> Vec<&Task> {
        self.projects
            .iter()
            .flat_map(|project| project.tasks.iter())
            .filter(|task| task.is_assigned_to(user_id))
            .collect()
    }

    /// Advisory double-booking check for a task already in the snapshot.
    pub fn task_conflicts(&self, task: &Task) -> Vec<String> {
        scheduling::conflicting_workers(&self.projects, &self.users, task)
    }

    // ---- materials ----

    pub fn create_material_request(
        &mut self,
        request: MaterialRequest,
    ) -> WorkforceResult<MaterialRequest> {
        let mut next = self.materials.clone();
        next.push(request.clone());
        validation::validate_materials(&next, &self.projects)?;
        self.materials = next;
        Ok(request)
    }

    pub fn update_material_request(
        &mut self,
        request_id: &str,
        mut payload: MaterialRequest,
    ) -> WorkforceResult<MaterialRequest> {
        payload.id = request_id.to_string();
        let index = self
            .materials
            .iter()
            .position(|request| request.id == request_id)
            .ok_or_else(|| WorkforceError::MaterialNotFound(request_id.to_string()))?;

        let mut next = self.materials.clone();
        next[index] = payload.clone();
        validation::validate_materials(&next, &self.projects)?;
        self.materials = next;
        Ok(payload)
    }

    // ---- derived views ----

    pub fn timeline(&self) -> Vec<TimelineEntry> {
        timeline::build_timeline(&self.projects)
    }

    fn prune_orphan_materials(&mut self) {
        let projects = &self.projects;
        self.materials.retain(|request| {
            projects
                .iter()
                .any(|project| project.find_task(&request.task_id).is_some())
        });
    }
}
