// Data models for the task planner

use serde::{Deserialize, Serialize};

/// Status label assigned by mark-done
pub const DONE: &str = "Done";

/// Status given to new tasks when the caller doesn't pick one
pub const DEFAULT_STATUS: &str = "todo";

/// A single to-do item
///
/// Stored with camelCase field names (`assignedTo`, `dueDate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: String,
    pub status: String,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == DONE
    }

    /// Everything except the id
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            due_date: self.due_date.clone(),
            status: self.status.clone(),
        }
    }

    /// Overwrite everything except the id
    pub(crate) fn apply(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.assigned_to = fields.assigned_to;
        self.due_date = fields.due_date;
        self.status = fields.status;
    }
}

/// The mutable part of a task, as supplied by the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: String,
    pub status: String,
}

impl TaskFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        assigned_to: impl Into<String>,
        due_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            assigned_to: assigned_to.into(),
            due_date: due_date.into(),
            status: status.into(),
        }
    }

    pub(crate) fn into_task(self, id: u64) -> Task {
        Task {
            id,
            name: self.name,
            description: self.description,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
            status: self.status,
        }
    }
}

/// Where new tasks land in the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOrder {
    /// Prepend, so the list reads newest-first
    #[default]
    NewestFirst,
    /// Append, so the list reads oldest-first
    OldestFirst,
}
