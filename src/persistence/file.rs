use super::{PersistenceError, PersistenceResult};
use crate::material::MaterialRequest;
use crate::project::Project;
use crate::timeline::TimelineEntry;
use crate::user::User;
use crate::workforce::Workforce;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// On-disk shape of a full snapshot. The timeline is not part of it; it is
/// derived from tasks on load.
#[derive(Serialize, Deserialize)]
struct WorkforceSnapshot {
    users: Vec<User>,
    projects: Vec<Project>,
    #[serde(default)]
    materials: Vec<MaterialRequest>,
}

impl WorkforceSnapshot {
    fn from_workforce(workforce: &Workforce) -> Self {
        Self {
            users: workforce.users().to_vec(),
            projects: workforce.projects().to_vec(),
            materials: workforce.materials().to_vec(),
        }
    }

    fn into_workforce(self) -> PersistenceResult<Workforce> {
        Workforce::from_parts(self.users, self.projects, self.materials)
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))
    }
}

pub fn save_workforce_to_json<P: AsRef<Path>>(
    workforce: &Workforce,
    path: P,
) -> PersistenceResult<()> {
    super::validate_workforce(workforce)?;
    let snapshot = WorkforceSnapshot::from_workforce(workforce);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_workforce_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Workforce> {
    let file = File::open(path)?;
    let snapshot: WorkforceSnapshot = serde_json::from_reader(file)?;
    snapshot.into_workforce()
}

/// Flat Gantt export row. Dates travel as `YYYY-MM-DD`.
#[derive(Serialize, Deserialize)]
struct TimelineCsvRecord {
    id: String,
    task_id: String,
    project_id: String,
    title: String,
    start_date: String,
    end_date: String,
}

impl From<&TimelineEntry> for TimelineCsvRecord {
    fn from(entry: &TimelineEntry) -> Self {
        Self {
            id: entry.id.clone(),
            task_id: entry.task_id.clone(),
            project_id: entry.project_id.clone(),
            title: entry.title.clone(),
            start_date: format_date(entry.start_date),
            end_date: format_date(entry.end_date),
        }
    }
}

impl TimelineCsvRecord {
    fn into_entry(self) -> PersistenceResult<TimelineEntry> {
        Ok(TimelineEntry {
            id: self.id,
            task_id: self.task_id,
            project_id: self.project_id,
            title: self.title,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
        })
    }
}

pub fn save_timeline_to_csv<P: AsRef<Path>>(
    workforce: &Workforce,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for entry in workforce.timeline() {
        writer.serialize(TimelineCsvRecord::from(&entry))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_timeline_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<TimelineEntry>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut entries = Vec::new();
    for record in reader.deserialize::<TimelineCsvRecord>() {
        entries.push(record?.into_entry()?);
    }
    Ok(entries)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> PersistenceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}
