use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::models::{Recurrence, RecurrenceUnit, Season, SeasonalTask};

use super::timers::{RemovalTimers, REMOVAL_DELAY};

/// The seasonal maintenance board: four fixed buckets of recurring chores.
///
/// Records are addressed by their generated stable id, never by position, so
/// a sweep that fires after the bucket has shifted still removes the record
/// it was scheduled for. The season is part of the storage key: moving a task
/// between seasons is a [`remove`](Self::remove) in one bucket and an
/// [`add`](Self::add) in the other.
///
/// Shares the completion lifecycle of [`TaskBook`](super::TaskBook): marking
/// a task completed sweeps it out after [`REMOVAL_DELAY`] unless it is
/// mutated back first.
#[derive(Clone)]
pub struct SeasonalBoard {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    seasons: HashMap<Season, Vec<SeasonalTask>>,
    timers: RemovalTimers<Uuid>,
}

impl SeasonalBoard {
    /// An empty board with all four season buckets.
    pub fn new() -> Self {
        let seasons = Season::ALL
            .into_iter()
            .map(|season| (season, Vec::new()))
            .collect();
        Self {
            inner: Arc::new(Mutex::new(Inner {
                seasons,
                timers: RemovalTimers::new(),
            })),
        }
    }

    /// A board pre-seeded with the stock homeowner checklist.
    pub fn with_default_checklist() -> Self {
        let board = Self::new();
        for (season, tasks) in default_checklist() {
            let mut inner = board.lock();
            inner
                .seasons
                .get_mut(&season)
                .expect("season buckets are fixed")
                .extend(tasks);
        }
        board
    }

    /// Contents of one season bucket, in insertion order.
    pub fn tasks(&self, season: Season) -> Vec<SeasonalTask> {
        self.lock().seasons[&season].clone()
    }

    /// Append a task to a season bucket and return its id.
    pub fn add(&self, season: Season, task: SeasonalTask) -> Uuid {
        let id = task.id;
        let mut inner = self.lock();
        inner
            .seasons
            .get_mut(&season)
            .expect("season buckets are fixed")
            .push(task);
        id
    }

    /// Flip the completed flag of the task with `id` in `season`.
    ///
    /// Same lifecycle as the daily list: completing schedules a sweep for
    /// [`REMOVAL_DELAY`] from now, un-completing cancels it. No-op on an
    /// unknown id.
    pub fn toggle(&self, season: Season, id: Uuid) {
        let mut inner = self.lock();
        let Some(task) = inner
            .seasons
            .get_mut(&season)
            .expect("season buckets are fixed")
            .iter_mut()
            .find(|t| t.id == id)
        else {
            tracing::debug!(%id, season = season.as_str(), "toggle of unknown seasonal task ignored");
            return;
        };
        task.completed = !task.completed;

        if task.completed {
            let handle = self.spawn_sweep(season, id);
            inner.timers.track(id, handle);
        } else {
            inner.timers.cancel(&id);
        }
    }

    /// Replace the task with `id` in `season`; no-op if absent.
    /// Cancels any pending sweep for the id.
    pub fn edit(&self, season: Season, id: Uuid, updated: SeasonalTask) {
        let mut inner = self.lock();
        inner.timers.cancel(&id);
        let bucket = inner
            .seasons
            .get_mut(&season)
            .expect("season buckets are fixed");
        match bucket.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = SeasonalTask { id, ..updated },
            None => tracing::debug!(%id, season = season.as_str(), "edit of unknown seasonal task ignored"),
        }
    }

    /// Remove the task with `id` from `season`; no-op if absent.
    pub fn remove(&self, season: Season, id: Uuid) {
        let mut inner = self.lock();
        inner.timers.cancel(&id);
        inner
            .seasons
            .get_mut(&season)
            .expect("season buckets are fixed")
            .retain(|t| t.id != id);
    }

    fn spawn_sweep(&self, season: Season, id: Uuid) -> AbortHandle {
        let inner = Arc::clone(&self.inner);
        let sweep = tokio::spawn(async move {
            tokio::time::sleep(REMOVAL_DELAY).await;
            let mut inner = inner.lock().expect("seasonal board lock poisoned");
            inner.timers.clear(&id);
            inner
                .seasons
                .get_mut(&season)
                .expect("season buckets are fixed")
                .retain(|t| t.id != id || !t.completed);
        });
        sweep.abort_handle()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("seasonal board lock poisoned")
    }
}

impl Default for SeasonalBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn yearly() -> Recurrence {
    Recurrence::Every {
        count: 1,
        unit: RecurrenceUnit::Years,
    }
}

fn twice_yearly() -> Recurrence {
    Recurrence::Every {
        count: 6,
        unit: RecurrenceUnit::Months,
    }
}

/// The stock checklist new boards start from.
fn default_checklist() -> [(Season, Vec<SeasonalTask>); 4] {
    [
        (
            Season::Winter,
            vec![
                SeasonalTask::new("Insulate exposed pipes", yearly()),
                SeasonalTask::new("Check roof for ice dams", yearly()),
                SeasonalTask::new("Cover/drain outdoor faucets", yearly()),
                SeasonalTask::new("Test smoke & CO detectors", twice_yearly()),
                SeasonalTask::new("Reverse ceiling fans (clockwise)", yearly()),
                SeasonalTask::new("Service furnace/heating system", yearly()),
            ],
        ),
        (
            Season::Spring,
            vec![
                SeasonalTask::new("Clean gutters", twice_yearly()),
                SeasonalTask::new("Check HVAC system", yearly()),
                SeasonalTask::new("Inspect roof for winter damage", yearly()),
                SeasonalTask::new("Power wash siding & driveway", yearly()),
                SeasonalTask::new("Air out the house", twice_yearly()),
                SeasonalTask::new("Inspect outdoor deck/furniture", yearly()),
            ],
        ),
        (
            Season::Summer,
            vec![
                SeasonalTask::new("Test smoke detectors", yearly()),
                SeasonalTask::new("Trim trees and bushes", yearly()),
                SeasonalTask::new("Clean fans and vents", twice_yearly()),
                SeasonalTask::new("Seal driveway", yearly()),
                SeasonalTask::new("Inspect for pest entry points", twice_yearly()),
                SeasonalTask::new("Clean windows/screens", twice_yearly()),
                SeasonalTask::new("Test home security before vacations", yearly()),
            ],
        ),
        (
            Season::Autumn,
            vec![
                SeasonalTask::new("Rake leaves and clean yard", yearly()),
                SeasonalTask::new("Service furnace", yearly()),
                SeasonalTask::new("Check weather stripping on doors/windows", yearly()),
                SeasonalTask::new("Cover/store patio furniture", yearly()),
                SeasonalTask::new("Test sump pump & battery", yearly()),
            ],
        ),
    ]
}
