use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use tracing::{debug, warn};

use crate::api::models::{RemoteTask, TaskDraft, TaskPatch};
use crate::api::{StoreError, TaskStore};
use crate::storage::ListCache;
use crate::task::{Task, TaskId};

/// List-level lifecycle. `Loading` drives the full-screen indicator on cold
/// start; manual refreshes use the separate `refreshing` flag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Errored,
}

/// Outcome of one remote call, sent back from its worker thread. Mutation
/// completions carry the pre-mutation snapshot so a rollback is a plain
/// vector swap.
enum Completion {
    List {
        refresh: bool,
        result: Result<Vec<RemoteTask>, StoreError>,
    },
    Create {
        temp_id: TaskId,
        result: Result<RemoteTask, StoreError>,
    },
    Update {
        id: TaskId,
        snapshot: Vec<Task>,
        result: Result<Option<RemoteTask>, StoreError>,
    },
    Delete {
        id: TaskId,
        snapshot: Vec<Task>,
        result: Result<(), StoreError>,
    },
}

/// Owns the in-memory task collection and runs every load/refresh and
/// mutation against the remote store.
///
/// Mutations apply optimistically: the local change is visible before the
/// worker thread is spawned, and the confirmation or rollback is applied by
/// [`poll`](Self::poll) in the order calls complete. Rows with a call in
/// flight are locked so a second mutation of the same item cannot start.
pub struct TaskController {
    store: Arc<dyn TaskStore>,
    cache: Option<ListCache>,
    tasks: Vec<Task>,
    phase: LoadPhase,
    refreshing: bool,
    error: Option<String>,
    in_flight: HashSet<TaskId>,
    completion_tx: mpsc::Sender<Completion>,
    completion_rx: mpsc::Receiver<Completion>,
}

impl TaskController {
    pub fn new(store: Arc<dyn TaskStore>, cache: Option<ListCache>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        Self {
            store,
            cache,
            tasks: Vec::new(),
            phase: LoadPhase::default(),
            refreshing: false,
            error: None,
            in_flight: HashSet::new(),
            completion_tx,
            completion_rx,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Message of the last failed operation. Replaced, never appended.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while anything is in flight; drives the status-bar spinner.
    pub fn busy(&self) -> bool {
        self.outstanding() > 0
    }

    /// An item refuses further mutations while a call for it is in flight,
    /// or while it still carries a temporary id.
    pub fn is_item_locked(&self, id: &TaskId) -> bool {
        id.is_temporary() || self.in_flight.contains(id)
    }

    fn outstanding(&self) -> usize {
        self.in_flight.len()
            + usize::from(self.phase == LoadPhase::Loading)
            + usize::from(self.refreshing)
    }

    /// Best-effort display of the last fetched list before the first remote
    /// answer arrives. An unreadable blob counts as no cache at all.
    pub fn seed_from_cache(&mut self) {
        let Some(cache) = &self.cache else { return };
        let Some(blob) = cache.load() else { return };

        match serde_json::from_str::<Vec<Task>>(&blob) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "seeded task list from cache");
                self.tasks = tasks;
            }
            Err(e) => {
                debug!("ignoring unreadable task cache: {e}");
            }
        }
    }

    pub fn load(&mut self) {
        self.error = None;
        self.phase = LoadPhase::Loading;
        self.spawn_list(false);
    }

    pub fn refresh(&mut self) {
        if self.refreshing || self.phase == LoadPhase::Loading {
            return;
        }
        self.error = None;
        self.refreshing = true;
        self.spawn_list(true);
    }

    /// The draft arrives trimmed and non-empty from the form. A placeholder
    /// with a temporary id is prepended immediately and swapped for the
    /// store's record (or removed) when the call completes.
    pub fn create(&mut self, draft: TaskDraft) {
        let placeholder = Task::optimistic(draft.title.clone(), draft.description.clone());
        let temp_id = placeholder.id.clone();
        self.tasks.insert(0, placeholder);
        self.in_flight.insert(temp_id.clone());

        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = store.create(&draft);
            let _ = tx.send(Completion::Create { temp_id, result });
        });
    }

    pub fn edit(&mut self, id: &TaskId, title: String, description: Option<String>) {
        if self.is_item_locked(id) {
            return;
        }
        let Some(remote_id) = id.as_persisted().map(str::to_string) else {
            return;
        };
        let Some(index) = self.tasks.iter().position(|t| &t.id == id) else {
            return;
        };

        let snapshot = self.tasks.clone();
        self.tasks[index].title = title.clone();
        self.tasks[index].description = description.clone();
        self.in_flight.insert(id.clone());

        let id = id.clone();
        let patch = TaskPatch::edit(title, description);
        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = store.update(&remote_id, &patch);
            let _ = tx.send(Completion::Update { id, snapshot, result });
        });
    }

    pub fn toggle(&mut self, id: &TaskId) {
        if self.is_item_locked(id) {
            return;
        }
        let Some(remote_id) = id.as_persisted().map(str::to_string) else {
            return;
        };
        let Some(index) = self.tasks.iter().position(|t| &t.id == id) else {
            return;
        };

        let snapshot = self.tasks.clone();
        let completed = !self.tasks[index].completed;
        self.tasks[index].completed = completed;
        self.in_flight.insert(id.clone());

        let id = id.clone();
        let patch = TaskPatch::completion(completed);
        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = store.update(&remote_id, &patch);
            let _ = tx.send(Completion::Update { id, snapshot, result });
        });
    }

    pub fn delete(&mut self, id: &TaskId) {
        if self.is_item_locked(id) {
            return;
        }
        let Some(remote_id) = id.as_persisted().map(str::to_string) else {
            return;
        };
        if !self.tasks.iter().any(|t| &t.id == id) {
            return;
        }

        let snapshot = self.tasks.clone();
        self.tasks.retain(|t| &t.id != id);
        self.in_flight.insert(id.clone());

        let id = id.clone();
        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = store.delete(&remote_id);
            let _ = tx.send(Completion::Delete { id, snapshot, result });
        });
    }

    /// Applies every finished remote call, in the order calls completed.
    /// Returns true if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
            changed = true;
        }
        changed
    }

    fn spawn_list(&self, refresh: bool) {
        let store = Arc::clone(&self.store);
        let tx = self.completion_tx.clone();
        thread::spawn(move || {
            let result = store.list();
            let _ = tx.send(Completion::List { refresh, result });
        });
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::List { refresh, result } => {
                if refresh {
                    self.refreshing = false;
                }
                match result {
                    Ok(remote) => {
                        self.tasks = remote.into_iter().map(Task::from).collect();
                        self.phase = LoadPhase::Ready;
                        self.error = None;
                        self.write_cache();
                    }
                    Err(e) => {
                        // Whatever is on screen (cache-seeded or not) stays.
                        if self.phase == LoadPhase::Loading {
                            self.phase = LoadPhase::Errored;
                        }
                        self.error = Some(e.to_string());
                    }
                }
            }
            Completion::Create { temp_id, result } => {
                self.in_flight.remove(&temp_id);
                match result {
                    Ok(remote) => {
                        self.tasks.retain(|task| task.id != temp_id);
                        self.tasks.insert(0, Task::from(remote));
                        self.error = None;
                    }
                    Err(e) => {
                        self.tasks.retain(|task| task.id != temp_id);
                        self.error = Some(e.to_string());
                    }
                }
            }
            Completion::Update {
                id,
                snapshot,
                result,
            } => {
                self.in_flight.remove(&id);
                match result {
                    Ok(Some(remote)) => {
                        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                            *task = Task::from(remote);
                        }
                        self.error = None;
                    }
                    Ok(None) => {
                        // Store confirmed without a payload; the optimistic
                        // copy stands.
                        debug!(%id, "update confirmed without payload");
                        self.error = None;
                    }
                    Err(e) => {
                        self.tasks = snapshot;
                        self.error = Some(e.to_string());
                    }
                }
            }
            Completion::Delete {
                id,
                snapshot,
                result,
            } => {
                self.in_flight.remove(&id);
                match result {
                    Ok(()) => {
                        self.error = None;
                    }
                    Err(e) => {
                        self.tasks = snapshot;
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn write_cache(&self) {
        let Some(cache) = &self.cache else { return };
        match serde_json::to_string(&self.tasks) {
            Ok(blob) => {
                if let Err(e) = cache.save(&blob) {
                    warn!("failed to write task cache: {e}");
                }
            }
            Err(e) => warn!("failed to serialize task cache: {e}"),
        }
    }
}
