use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::AbortHandle;

use crate::client::{ClientError, UpkeepClient};
use crate::models::{CreateTaskInput, Task, TaskId};

use super::agenda::{group_by_due_date, AgendaGroup, LocationFilter};
use super::timers::{RemovalTimers, REMOVAL_DELAY};

/// Session-scoped store for the daily task list.
///
/// All screens read from one `TaskBook` instead of holding their own copies.
/// The book owns its records exclusively and hands out snapshots; mutation is
/// by id, and operations on a missing id are silent no-ops (last write wins,
/// unknown ids ignored).
///
/// Completing a task schedules its removal after [`REMOVAL_DELAY`]. The sweep
/// is keyed by id and cancelled by any mutation of that id before the
/// deadline, so un-toggling within the window reliably keeps the task.
///
/// Requires a Tokio runtime for the sweep timers.
#[derive(Clone)]
pub struct TaskBook {
    inner: Arc<Mutex<Inner>>,
    remote: Option<Remote>,
}

struct Inner {
    tasks: Vec<Task>,
    timers: RemovalTimers<TaskId>,
}

#[derive(Clone)]
struct Remote {
    client: UpkeepClient,
    household_id: i64,
}

impl TaskBook {
    /// A book holding local state only.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                tasks: Vec::new(),
                timers: RemovalTimers::new(),
            })),
            remote: None,
        }
    }

    /// A book that writes new tasks through to the backend for `household_id`.
    pub fn with_remote(client: UpkeepClient, household_id: i64) -> Self {
        Self {
            remote: Some(Remote {
                client,
                household_id,
            }),
            ..Self::new()
        }
    }

    /// Current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.lock().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().tasks.is_empty()
    }

    /// Append a task, optimistically, then write it through to the backend.
    ///
    /// The local insert always happens; a backend failure is surfaced to the
    /// caller rather than dropped. Ids are caller-assigned and unique by
    /// convention only.
    pub async fn add(&self, task: Task) -> Result<(), ClientError> {
        {
            let mut inner = self.lock();
            if inner.tasks.iter().any(|t| t.id == task.id) {
                tracing::warn!(id = task.id, "task id already present in book");
            }
            inner.tasks.push(task.clone());
        }

        if let Some(remote) = &self.remote {
            remote
                .client
                .create_task(&CreateTaskInput::from_task(&task, remote.household_id))
                .await?;
        }
        Ok(())
    }

    /// Replace the record matching `id`; no-op if absent.
    /// Cancels any pending sweep for the id.
    pub fn edit(&self, id: TaskId, updated: Task) {
        let mut inner = self.lock();
        inner.timers.cancel(&id);
        match inner.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => *slot = Task { id, ..updated },
            None => tracing::debug!(id, "edit of unknown task id ignored"),
        }
    }

    /// Flip the completed flag.
    ///
    /// On the incomplete→completed transition a sweep is scheduled for
    /// [`REMOVAL_DELAY`] from now; at fire time the record is removed only if
    /// it is still completed. The completed→incomplete transition cancels any
    /// pending sweep.
    pub fn toggle(&self, id: TaskId) {
        let mut inner = self.lock();
        let Some(task) = inner.tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "toggle of unknown task id ignored");
            return;
        };
        task.completed = !task.completed;

        if task.completed {
            let handle = self.spawn_sweep(id);
            inner.timers.track(id, handle);
        } else {
            inner.timers.cancel(&id);
        }
    }

    /// Remove the record matching `id`; no-op if absent.
    pub fn remove(&self, id: TaskId) {
        let mut inner = self.lock();
        inner.timers.cancel(&id);
        inner.tasks.retain(|t| t.id != id);
    }

    /// Derive the grouped agenda for an explicit reference day.
    pub fn agenda_for_day(&self, filter: &LocationFilter, day: chrono::NaiveDate) -> Vec<AgendaGroup> {
        group_by_due_date(&self.lock().tasks, filter, day)
    }

    /// Derive the grouped agenda relative to the current UTC day.
    pub fn agenda(&self, filter: &LocationFilter) -> Vec<AgendaGroup> {
        self.agenda_for_day(filter, Utc::now().date_naive())
    }

    fn spawn_sweep(&self, id: TaskId) -> AbortHandle {
        let inner = Arc::clone(&self.inner);
        let sweep = tokio::spawn(async move {
            tokio::time::sleep(REMOVAL_DELAY).await;
            let mut inner = inner.lock().expect("task book lock poisoned");
            inner.timers.clear(&id);
            inner.tasks.retain(|t| t.id != id || !t.completed);
        });
        sweep.abort_handle()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("task book lock poisoned")
    }
}

impl Default for TaskBook {
    fn default() -> Self {
        Self::new()
    }
}
