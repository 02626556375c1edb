//! Starter dataset for a fresh installation: one master account, four
//! operarios, one open incident with a diagnostic task under way, and one
//! construction project with nothing scheduled yet.

use chrono::NaiveDate;

use crate::project::{Project, ProjectType};
use crate::task::{Task, TaskStatus};
use crate::user::{Specialty, User, UserRole};
use crate::workforce::Workforce;

/// Build the seed snapshot. `today` anchors the sample task so the fixture
/// stays deterministic for callers that need it to be.
pub fn seed_workforce(today: NaiveDate) -> Workforce {
    let mut users = vec![
        User::new("u1", "Admin Master", "admin", UserRole::Master),
        User::new("u2", "Juan Electricista", "juan", UserRole::Operario),
        User::new("u3", "Pedro Herrero", "pedro", UserRole::Operario),
        User::new("u4", "Luis Almacen", "luis", UserRole::Operario),
        User::new("u5", "Ana Ingeniera", "ana", UserRole::Operario),
    ];
    users[1].specialty = Some(Specialty::Electricista);
    users[2].specialty = Some(Specialty::Herrero);
    users[3].specialty = Some(Specialty::Almacen);
    users[4].specialty = Some(Specialty::Ingeniero);

    let mut diagnostico = Task::new("t1", "p1", "Diagnóstico inicial", today, 4.0);
    diagnostico.description = "Revisar voltaje y cableado principal".to_string();
    diagnostico.assigned_user_ids = vec!["u2".to_string()];
    diagnostico.status = TaskStatus::InProgress;

    let mut generador = Project::new("p1", "Reparación Generador", "Hospital Central", ProjectType::Averia);
    generador.tasks.push(diagnostico);

    let nave = Project::new("p2", "Nave Industrial Zona B", "Logística Sur", ProjectType::Obra);

    Workforce::from_parts(users, vec![generador, nave], Vec::new())
        .expect("seed data is well-formed")
}
