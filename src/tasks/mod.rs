//! Task domain layer — record validation, normalization, and the six
//! operations exposed over REST.
//!
//! Handlers stay thin: every rule about what a task may look like lives
//! here, enforced before anything reaches the store.

use serde::Deserialize;
use std::sync::Arc;

use crate::storage::{Storage, TaskRow};

/// Operation outcome taxonomy. Each variant maps to exactly one HTTP
/// status at the REST boundary: Validation → 400, NotFound → 404,
/// Store → 500.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Input failed validation; the caller can correct and resubmit.
    #[error("{0}")]
    Validation(String),
    /// No task exists under the given identifier.
    #[error("Task not found")]
    NotFound,
    /// Persistence-layer fault, including unparseable identifiers.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Body of `POST /api/v1/tasks`. `Option` distinguishes an omitted field
/// from an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /api/v1/tasks/{id}`. `completed: None` means "field not
/// supplied" and retains the stored value — omitting it never resets a
/// done task.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Title must be present and non-empty after trimming; the trimmed value
/// is what gets persisted. Applied identically on create and update.
fn require_title(title: Option<&str>) -> Result<String, TaskError> {
    let trimmed = title.unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(TaskError::Validation("Title is required".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Description is trimmed when present and coerced to "" when absent.
fn normalize_description(description: Option<&str>) -> String {
    description.map(str::trim).unwrap_or("").to_string()
}

/// Task operations over the shared storage handle.
///
/// Update, toggle, and delete are fetch-then-save with no optimistic
/// concurrency check; concurrent writers on the same id race and the
/// later save wins.
#[derive(Clone)]
pub struct TaskService {
    storage: Arc<Storage>,
}

impl TaskService {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// All tasks, newest first.
    pub async fn list(&self) -> Result<Vec<TaskRow>, TaskError> {
        Ok(self.storage.list_tasks().await?)
    }

    pub async fn get(&self, id: &str) -> Result<TaskRow, TaskError> {
        self.storage.get_task(id).await?.ok_or(TaskError::NotFound)
    }

    pub async fn create(&self, input: CreateTask) -> Result<TaskRow, TaskError> {
        let title = require_title(input.title.as_deref())?;
        let description = normalize_description(input.description.as_deref());
        Ok(self.storage.insert_task(&title, &description).await?)
    }

    /// Full update: overwrites title and description; `completed` is
    /// overwritten only when the field was supplied.
    pub async fn update(&self, id: &str, input: UpdateTask) -> Result<TaskRow, TaskError> {
        let existing = self.get(id).await?;
        let title = require_title(input.title.as_deref())?;
        let description = normalize_description(input.description.as_deref());
        let completed = input.completed.unwrap_or(existing.completed);
        Ok(self
            .storage
            .save_task(id, &title, &description, completed)
            .await?)
    }

    /// Flip the completion flag.
    pub async fn toggle(&self, id: &str) -> Result<TaskRow, TaskError> {
        let existing = self.get(id).await?;
        Ok(self
            .storage
            .save_task(
                id,
                &existing.title,
                &existing.description,
                !existing.completed,
            )
            .await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TaskError> {
        self.get(id).await?;
        Ok(self.storage.delete_task(id).await?)
    }
}
