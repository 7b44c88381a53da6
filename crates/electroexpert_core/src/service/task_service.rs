//! Task store: the maintenance log collection.
//!
//! # Responsibility
//! - Provide list/search/agenda queries over tasks in store order.
//! - Apply upsert/remove and re-persist the whole collection.
//! - Seed demonstration tasks into an empty log.
//!
//! # Invariants
//! - New tasks are inserted at the front; edits keep their position.
//! - Task ids are unique within the store.
//! - Persistence failures leave the in-memory collection unchanged.

use crate::clock::SharedClock;
use crate::model::record_date::parse_record_date;
use crate::model::task::{Task, TaskDraft};
use crate::repo::collection_repo::{CollectionKey, CollectionRepository, RepoResult};
use crate::service::seed::demo_task_drafts;
use log::{info, warn};
use std::collections::HashSet;

/// In-memory task collection backed by a collection repository.
pub struct TaskStore<R: CollectionRepository> {
    repo: R,
    clock: SharedClock,
    tasks: Vec<Task>,
}

impl<R: CollectionRepository> TaskStore<R> {
    /// Loads the persisted log, seeding it when empty.
    ///
    /// Loaded entries are re-defaulted; entries repeating an earlier id are
    /// dropped. When either step changed the snapshot, the normalized
    /// collection is written back so generated ids and dates stay stable
    /// across sessions.
    ///
    /// # Errors
    /// - Storage transport errors while loading or saving.
    pub fn open(repo: R, clock: SharedClock) -> RepoResult<Self> {
        let drafts: Vec<TaskDraft> = repo.load(CollectionKey::Tasks)?;
        let loaded = drafts.len();

        let mut seen = HashSet::new();
        let mut normalized = false;
        let mut tasks = Vec::with_capacity(loaded);
        for draft in drafts {
            let task = Task::from_draft(draft.clone(), clock.as_ref());
            normalized |= task.to_draft() != draft;
            if seen.insert(task.id.clone()) {
                tasks.push(task);
            }
        }
        if tasks.len() != loaded {
            warn!(
                "event=task_store_open module=service status=deduplicated loaded={} kept={}",
                loaded,
                tasks.len()
            );
        }

        let mut store = Self {
            repo,
            clock,
            tasks: Vec::new(),
        };
        if tasks.is_empty() {
            store.seed()?;
        } else if normalized || tasks.len() != loaded {
            store.commit(tasks)?;
            info!(
                "event=task_store_open module=service status=normalized count={}",
                store.tasks.len()
            );
        } else {
            store.tasks = tasks;
        }

        info!(
            "event=task_store_open module=service status=ok count={}",
            store.tasks.len()
        );
        Ok(store)
    }

    /// Tasks in store order (most recent first).
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks whose date equals `date` exactly, in store order.
    ///
    /// Returns an empty list when nothing matches or `date` is not a valid
    /// `YYYY-MM-DD` value.
    pub fn list_by_date(&self, date: &str) -> Vec<Task> {
        let Some(date) = parse_record_date(date) else {
            return Vec::new();
        };
        self.tasks
            .iter()
            .filter(|task| task.date == date)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over title, description and
    /// category. An empty query returns every task.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Creates or replaces a task.
    ///
    /// When `draft.id` names an existing task, that task is replaced by the
    /// defaulted draft at the same position. Otherwise a new task is
    /// inserted at the front.
    pub fn upsert(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        let task = Task::from_draft(draft, self.clock.as_ref());
        let mut next = self.tasks.clone();

        let mode = match next.iter().position(|existing| existing.id == task.id) {
            Some(index) => {
                next[index] = task.clone();
                "update"
            }
            None => {
                next.insert(0, task.clone());
                "create"
            }
        };

        self.commit(next)?;
        info!(
            "event=task_upsert module=service status=ok mode={} id={} count={}",
            mode,
            task.id,
            self.tasks.len()
        );
        Ok(task)
    }

    /// Removes the task with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> RepoResult<()> {
        let before = self.tasks.len();
        let next: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        let removed = before - next.len();

        self.commit(next)?;
        info!(
            "event=task_remove module=service status=ok id={} removed={}",
            id, removed
        );
        Ok(())
    }

    fn seed(&mut self) -> RepoResult<()> {
        let seeded: Vec<Task> = demo_task_drafts(self.clock.today())
            .into_iter()
            .map(|draft| Task::from_draft(draft, self.clock.as_ref()))
            .collect();
        self.commit(seeded)?;
        info!(
            "event=task_seed module=service status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }

    fn commit(&mut self, next: Vec<Task>) -> RepoResult<()> {
        self.repo.save(CollectionKey::Tasks, &next)?;
        self.tasks = next;
        Ok(())
    }
}
