// Task collection with optional write-through persistence

use crate::models::{DONE, InsertOrder, Task, TaskFields};
use crate::slot::{Slot, validate_key};
use eyre::{Context, Result, eyre};
use std::collections::HashSet;
use tracing::{debug, info};

/// Slot key used when none is configured
pub const DEFAULT_SLOT_KEY: &str = "tasks";

/// Owner of the task list and of identifier assignment
///
/// With a slot attached, every mutation rewrites the whole list to the slot
/// before returning. Lookups by an id that isn't present are no-ops, never
/// errors. Mutations fail only on a slot write or when ids run out.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    order: InsertOrder,
    slot: Option<(Box<dyn Slot>, String)>,
}

impl TaskStore {
    /// Create a store that lives only as long as this value
    pub fn in_memory(order: InsertOrder) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            order,
            slot: None,
        }
    }

    /// Open a persistent store, loading whatever the slot holds under `key`
    ///
    /// A slot holding something that isn't a task list is an error: the store
    /// refuses to start rather than overwrite the data on the next mutation.
    /// Duplicate ids, or an id too large to leave room for another task,
    /// count as corruption too.
    pub fn open<S: Slot + 'static>(slot: S, key: &str, order: InsertOrder) -> Result<Self> {
        validate_key(key)?;

        let tasks: Vec<Task> = match slot.read(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("Stored task list is corrupted (slot '{}')", key))?,
            None => Vec::new(),
        };

        let mut seen = HashSet::with_capacity(tasks.len());
        let mut next_id: u64 = 0;
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(eyre!(
                    "Stored task list is corrupted (slot '{}'): duplicate id {}",
                    key,
                    task.id
                ));
            }
            let after = task.id.checked_add(1).ok_or_else(|| {
                eyre!("Stored task list is corrupted (slot '{}'): id {} out of range", key, task.id)
            })?;
            next_id = next_id.max(after);
        }

        info!(key, count = tasks.len(), next_id, "Loaded tasks");

        Ok(Self {
            tasks,
            next_id,
            order,
            slot: Some((Box::new(slot), key.to_string())),
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn order(&self) -> InsertOrder {
        self.order
    }

    pub fn is_persistent(&self) -> bool {
        self.slot.is_some()
    }

    /// Add a task, returning it with its freshly assigned id
    pub fn add_task(&mut self, fields: TaskFields) -> Result<Task> {
        let next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| eyre!("Task id space exhausted at {}", self.next_id))?;
        let task = fields.into_task(self.next_id);
        self.next_id = next_id;

        match self.order {
            InsertOrder::NewestFirst => self.tasks.insert(0, task.clone()),
            InsertOrder::OldestFirst => self.tasks.push(task.clone()),
        }

        debug!(id = task.id, name = %task.name, "Added task");
        self.persist()?;
        Ok(task)
    }

    pub fn delete_task(&mut self, id: u64) -> Result<()> {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                self.tasks.remove(index);
                debug!(id, "Deleted task");
            }
            None => debug!(id, "delete_task: no such task"),
        }
        self.persist()
    }

    /// Overwrite every field but the id, keeping the task's position
    pub fn update_task(&mut self, id: u64, fields: TaskFields) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.apply(fields);
                debug!(id, "Updated task");
            }
            None => debug!(id, "update_task: no such task"),
        }
        self.persist()
    }

    pub fn mark_task_as_done(&mut self, id: u64) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = DONE.to_string();
                debug!(id, "Marked task done");
            }
            None => debug!(id, "mark_task_as_done: no such task"),
        }
        self.persist()
    }

    /// Write the full task list to the slot; no-op for in-memory stores
    pub fn persist(&mut self) -> Result<()> {
        let Some((slot, key)) = self.slot.as_mut() else {
            return Ok(());
        };

        let json = serde_json::to_string(&self.tasks).context("Failed to serialize tasks")?;
        slot.write(key, &json)
            .with_context(|| format!("Failed to persist tasks to slot '{}'", key))?;

        debug!(key = %key, count = self.tasks.len(), "Persisted tasks");
        Ok(())
    }
}
