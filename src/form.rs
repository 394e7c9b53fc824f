// Task form: input validation and create/edit dispatch

use crate::models::{Task, TaskFields};
use crate::store::TaskStore;
use eyre::Result;
use thiserror::Error;
use tracing::debug;

pub const MAX_NAME_LEN: usize = 8;
pub const MAX_DESCRIPTION_LEN: usize = 15;
pub const MAX_ASSIGNED_TO_LEN: usize = 8;

/// Raw values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: String,
    pub status: String,
}

impl From<TaskFields> for TaskInput {
    fn from(fields: TaskFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            assigned_to: fields.assigned_to,
            due_date: fields.due_date,
            status: fields.status,
        }
    }
}

/// Why a submission was rejected; shown to the user as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task Name must not be empty and should not exceed {} characters.", MAX_NAME_LEN)]
    Name,
    #[error("Add some relevant description and not longer than {} characters.", MAX_DESCRIPTION_LEN)]
    Description,
    #[error("Assigned To field must not be empty and should not exceed {} characters.", MAX_ASSIGNED_TO_LEN)]
    AssignedTo,
}

/// Check the text fields, returning trimmed values ready for the store
///
/// Fields are checked in form order and the first failure wins.
pub fn validate(input: &TaskInput) -> Result<TaskFields, ValidationError> {
    let name = input.name.trim();
    let description = input.description.trim();
    let assigned_to = input.assigned_to.trim();

    if !within(name, MAX_NAME_LEN) {
        return Err(ValidationError::Name);
    }
    if !within(description, MAX_DESCRIPTION_LEN) {
        return Err(ValidationError::Description);
    }
    if !within(assigned_to, MAX_ASSIGNED_TO_LEN) {
        return Err(ValidationError::AssignedTo);
    }

    Ok(TaskFields::new(
        name,
        description,
        assigned_to,
        input.due_date.clone(),
        input.status.clone(),
    ))
}

fn within(value: &str, max: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max
}

/// Which store operation a submission goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Editing(u64),
}

/// Result of a submission that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted {
    Created(Task),
    Updated(u64),
}

/// Form state shared by the create and edit flows
#[derive(Debug, Default)]
pub struct TaskForm {
    mode: FormMode,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Switch to editing `id`, returning its current values to prefill the form
    ///
    /// Unknown ids leave the form in its current mode.
    pub fn begin_edit(&mut self, store: &TaskStore, id: u64) -> Option<TaskInput> {
        let task = store.get(id)?;
        self.mode = FormMode::Editing(id);
        debug!(id, "Form switched to edit mode");
        Some(task.fields().into())
    }

    pub fn cancel(&mut self) {
        self.mode = FormMode::Create;
    }

    /// Validate and hand the input to the store
    ///
    /// The outer error is a store failure; the inner one is a rejected input,
    /// in which case the store is untouched and the mode is kept.
    pub fn submit(
        &mut self,
        store: &mut TaskStore,
        input: &TaskInput,
    ) -> Result<Result<Submitted, ValidationError>> {
        let fields = match validate(input) {
            Ok(fields) => fields,
            Err(e) => {
                debug!(error = %e, "Form input rejected");
                return Ok(Err(e));
            }
        };

        match self.mode {
            FormMode::Create => {
                let task = store.add_task(fields)?;
                Ok(Ok(Submitted::Created(task)))
            }
            FormMode::Editing(id) => {
                store.update_task(id, fields)?;
                self.mode = FormMode::Create;
                Ok(Ok(Submitted::Updated(id)))
            }
        }
    }
}
