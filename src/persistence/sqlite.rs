use super::{PersistenceResult, WorkforceStore};
use crate::material::MaterialRequest;
use crate::project::Project;
use crate::user::User;
use crate::workforce::Workforce;
use rusqlite::{Connection, params};
use std::sync::Mutex;

/// Stores each entity as a JSON blob keyed by id, one table per
/// collection. The timeline is derived and never stored.
pub struct SqliteWorkforceStore {
    connection: Mutex<Connection>,
}

impl SqliteWorkforceStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                user_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                project_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS materials (
                id TEXT PRIMARY KEY,
                material_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_users(&self, tx: &rusqlite::Transaction, users: &[User]) -> PersistenceResult<()> {
        tx.execute("DELETE FROM users", [])?;
        let mut stmt = tx.prepare("INSERT INTO users (id, user_json) VALUES (?1, ?2)")?;
        for user in users {
            let json = serde_json::to_string(user)?;
            stmt.execute(params![user.id, json])?;
        }
        Ok(())
    }

    fn save_projects(
        &self,
        tx: &rusqlite::Transaction,
        projects: &[Project],
    ) -> PersistenceResult<()> {
        tx.execute("DELETE FROM projects", [])?;
        let mut stmt = tx.prepare("INSERT INTO projects (id, project_json) VALUES (?1, ?2)")?;
        for project in projects {
            let json = serde_json::to_string(project)?;
            stmt.execute(params![project.id, json])?;
        }
        Ok(())
    }

    fn save_materials(
        &self,
        tx: &rusqlite::Transaction,
        materials: &[MaterialRequest],
    ) -> PersistenceResult<()> {
        tx.execute("DELETE FROM materials", [])?;
        let mut stmt = tx.prepare("INSERT INTO materials (id, material_json) VALUES (?1, ?2)")?;
        for request in materials {
            let json = serde_json::to_string(request)?;
            stmt.execute(params![request.id, json])?;
        }
        Ok(())
    }
}

impl WorkforceStore for SqliteWorkforceStore {
    fn save_workforce(&self, workforce: &Workforce) -> PersistenceResult<()> {
        super::validate_workforce(workforce)?;
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        self.save_users(&tx, workforce.users())?;
        self.save_projects(&tx, workforce.projects())?;
        self.save_materials(&tx, workforce.materials())?;
        tx.commit()?;
        Ok(())
    }

    fn load_workforce(&self) -> PersistenceResult<Option<Workforce>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let mut stmt = conn.prepare("SELECT user_json FROM users ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut users = Vec::new();
        for json in rows {
            let user: User = serde_json::from_str(&json?)?;
            users.push(user);
        }

        let mut stmt = conn.prepare("SELECT project_json FROM projects ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut projects = Vec::new();
        for json in rows {
            let project: Project = serde_json::from_str(&json?)?;
            projects.push(project);
        }

        let mut stmt = conn.prepare("SELECT material_json FROM materials ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut materials = Vec::new();
        for json in rows {
            let request: MaterialRequest = serde_json::from_str(&json?)?;
            materials.push(request);
        }

        if users.is_empty() && projects.is_empty() && materials.is_empty() {
            return Ok(None);
        }

        let workforce = Workforce::from_parts(users, projects, materials)
            .map_err(|err| super::PersistenceError::InvalidData(err.to_string()))?;
        Ok(Some(workforce))
    }
}
