pub mod calendar;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod material;
pub mod persistence;
pub mod project;
pub mod scheduling;
pub mod seed;
pub mod task;
pub mod timeline;
pub mod user;
pub mod validation;
pub mod workforce;

pub use calendar::WorkCalendar;
pub use material::{MaterialRequest, MaterialStatus};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteWorkforceStore;
pub use persistence::{
    PersistenceError, WorkforceStore, load_timeline_from_csv, load_workforce_from_json,
    save_timeline_to_csv, save_workforce_to_json, validate_workforce,
};
pub use project::{Project, ProjectType};
pub use task::{Task, TaskStatus};
pub use timeline::TimelineEntry;
pub use user::{Specialty, User, UserRole};
pub use validation::ValidationError;
pub use workforce::Workforce;
