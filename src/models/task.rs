use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::recurrence::Recurrence;

/// Identifier for a task in the local collection.
///
/// Ids are caller-assigned at creation time (the editing form derives one from
/// the current timestamp) and unique by convention, not enforcement.
pub type TaskId = i64;

/// Rooms the location picker suggests; anything else is a free-form custom value.
pub const DEFAULT_LOCATIONS: &[&str] = &[
    "Kitchen",
    "Bathroom",
    "Bedroom",
    "Living Room",
    "Hallway",
    "Garage",
];

/// A dated to-do on the daily task list.
///
/// Tasks live in a [`TaskBook`](crate::state::TaskBook), which owns them
/// exclusively. Completing a task starts a short grace window before it is
/// swept from the list; toggling it back within the window keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Room the task applies to; one of [`DEFAULT_LOCATIONS`] or free-form.
    pub location: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "frequency")]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub completed: bool,
}

/// A task row as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    pub household_id: i64,
    pub title: String,
    pub location: String,
    pub due_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(rename = "frequency")]
    pub recurrence: Recurrence,
    pub completed: bool,
}

/// Input for creating a task through the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub household_id: i64,
    pub title: String,
    pub location: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, rename = "frequency")]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTaskInput {
    /// Lift a local task into a backend insert for the given household.
    pub fn from_task(task: &Task, household_id: i64) -> Self {
        Self {
            household_id,
            title: task.title.clone(),
            location: task.location.clone(),
            due_date: task.due_date,
            notes: task.notes.clone(),
            recurrence: task.recurrence,
            completed: task.completed,
        }
    }
}
