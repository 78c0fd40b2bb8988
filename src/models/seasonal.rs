use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::recurrence::Recurrence;

/// One of the four fixed buckets the seasonal board is partitioned into.
///
/// The season is part of a task's storage key, not a field on the record:
/// moving a task between seasons is a remove-from-one/insert-into-other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// All seasons, in board display order.
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "Winter",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Winter" => Some(Self::Winter),
            "Spring" => Some(Self::Spring),
            "Summer" => Some(Self::Summer),
            "Autumn" => Some(Self::Autumn),
            _ => None,
        }
    }
}

/// A recurring chore on the seasonal maintenance board.
///
/// Records carry a generated stable id so that edits, deletes and the
/// completion sweep address the same record even while the bucket shifts
/// underneath them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default, rename = "frequency")]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SeasonalTask {
    /// Create a not-yet-completed task with a fresh id.
    pub fn new(title: impl Into<String>, recurrence: Recurrence) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            recurrence,
            completed: false,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
