//! Span computation and double-booking detection.
//!
//! Both functions are pure: they borrow an immutable snapshot supplied by
//! the caller and return derived values. The task editor composes them:
//! recompute the span with the updated worker count first, then re-check
//! every assigned worker against that span.

use chrono::NaiveDate;

use crate::calendar::WorkCalendar;
use crate::project::Project;
use crate::task::Task;
use crate::user::User;

/// Hours of effort one worker delivers per working day.
pub const DAILY_HOURS: f64 = 8.0;

/// Project the completion date for a span of work.
///
/// Effort is split evenly across the assigned workers at [`DAILY_HOURS`]
/// per working day. A one-day task finishes on its start date, so the walk
/// advances `days_needed - 1` working days, stepping over weekends without
/// counting them. With zero workers nothing is schedulable and the start
/// date comes back unchanged.
///
/// Weekend skipping is not uniform across week boundaries, so the span is
/// found by walking calendar days rather than by a closed-form formula.
pub fn compute_end_date(
    calendar: &WorkCalendar,
    start: NaiveDate,
    estimated_hours: f64,
    worker_count: usize,
) -> NaiveDate {
    if worker_count == 0 {
        return start;
    }

    let hours_per_worker = estimated_hours / worker_count as f64;
    let days_needed = (hours_per_worker / DAILY_HOURS).ceil() as i64;

    // A one-day span ends the day it starts.
    let days_to_advance = (days_needed - 1).max(0);
    calendar.advance_workdays(start, days_to_advance)
}

/// Determine whether a worker is already committed during a proposed span.
///
/// Linear scan over every task in every project. A task blocks the span
/// when the worker is among its assignees, the task is still live, and the
/// inclusive date ranges overlap. `exclude_task_id` skips the task being
/// edited so it never collides with itself.
pub fn has_conflict(
    projects: &[Project],
    worker_id: &str,
    proposed_start: NaiveDate,
    proposed_end: NaiveDate,
    exclude_task_id: Option<&str>,
) -> bool {
    for project in projects {
        for task in &project.tasks {
            if exclude_task_id.is_some_and(|id| id == task.id) {
                continue;
            }
            if !task.is_assigned_to(worker_id) || !task.status.is_live() {
                continue;
            }
            // Inclusive overlap on date-only granularity.
            if proposed_start <= task.end_date && task.start_date <= proposed_end {
                return true;
            }
        }
    }
    false
}

/// Re-validate every assignee of a task against its current span.
///
/// Returns the display names of workers with an overlapping live
/// commitment elsewhere. The result is advisory; callers surface it as a
/// warning and still save.
pub fn conflicting_workers(projects: &[Project], users: &[User], task: &Task) -> Vec<String> {
    task.assigned_user_ids
        .iter()
        .filter(|worker_id| {
            has_conflict(
                projects,
                worker_id.as_str(),
                task.start_date,
                task.end_date,
                Some(task.id.as_str()),
            )
        })
        .map(|worker_id| {
            users
                .iter()
                .find(|user| user.id == *worker_id)
                .map(|user| user.name.clone())
                .unwrap_or_else(|| worker_id.clone())
        })
        .collect()
}
