/// Task model and database operations
///
/// Tasks are the core entity of TaskHive. Every task is owned by exactly one
/// user, and every query in this module carries the owner's `user_id` in its
/// WHERE clause. A task belonging to a different user therefore resolves the
/// same way as a missing row, never as a permission error.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('OPEN', 'IN_PROGRESS', 'DONE');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'OPEN',
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskhive_shared::models::task::{CreateTask, Task, TaskFilter, TaskStatus};
/// use uuid::Uuid;
///
/// # async fn example(pool: sqlx::PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
/// let task = Task::create(&pool, CreateTask {
///     title: "Buy milk".to_string(),
///     description: None,
///     user_id,
/// }).await?;
///
/// let done = Task::update_status(&pool, task.id, user_id, TaskStatus::Done).await?;
/// assert_eq!(done.unwrap().status, TaskStatus::Done);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, not started
    Open,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

/// Error returned when an inbound status string is not a known status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status '{0}' is not valid")]
pub struct InvalidTaskStatus(pub String);

impl TaskStatus {
    /// Converts status to its wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Parses a raw status string from a request
    ///
    /// Input is uppercase-normalized first, so `"done"` and `"DONE"` are both
    /// accepted. Anything outside {OPEN, IN_PROGRESS, DONE} is rejected with
    /// an error naming the offending value.
    pub fn parse(raw: &str) -> Result<Self, InvalidTaskStatus> {
        let normalized = raw.to_ascii_uppercase();
        match normalized.as_str() {
            "OPEN" => Ok(TaskStatus::Open),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "DONE" => Ok(TaskStatus::Done),
            _ => Err(InvalidTaskStatus(normalized)),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidTaskStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::parse(s)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Short task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Current workflow status
    pub status: TaskStatus,

    /// Owning user
    pub user_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Status is not part of the input: new tasks always start as `OPEN`.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title (required, non-empty; enforced at the API boundary)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning user
    pub user_id: Uuid,
}

/// Optional filters for listing a user's tasks
///
/// Filters compose with AND; an empty filter returns everything the user
/// owns.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks in this status
    pub status: Option<TaskStatus>,

    /// Case-insensitive substring match against title or description
    pub search: Option<String>,
}

impl Task {
    /// Creates a new task owned by `data.user_id` with status `OPEN`
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, status, user_id, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owner
    ///
    /// Returns `None` both when the task does not exist and when it belongs
    /// to a different user.
    pub async fn find_by_id_and_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, user_id, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks, applying any supplied filters
    ///
    /// The WHERE clause is assembled dynamically from the filter; bind
    /// placeholders are numbered as predicates are appended, and values are
    /// bound in the same order.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: Uuid,
        filter: &TaskFilter,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut query = String::from(
            "SELECT id, title, description, status, user_id, created_at, updated_at \
             FROM tasks WHERE user_id = $1",
        );
        let mut bind_count = 1;

        if filter.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(" AND status = ${}", bind_count));
        }
        if filter.search.is_some() {
            bind_count += 1;
            query.push_str(&format!(
                " AND (title ILIKE ${n} OR description ILIKE ${n})",
                n = bind_count
            ));
        }

        query.push_str(" ORDER BY created_at ASC");

        let mut q = sqlx::query_as::<_, Task>(&query).bind(user_id);

        if let Some(status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(format!("%{}%", search));
        }

        q.fetch_all(pool).await
    }

    /// Updates a task's status, scoped to its owner
    ///
    /// A single atomic UPDATE carries both the id and owner predicates, so
    /// there is no read-modify-write window and no separate ownership check.
    /// Returns `None` when the task is absent or owned by someone else.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, title, description, status, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task, scoped to its owner
    ///
    /// Returns true if a row was removed, false if the task was absent or
    /// owned by someone else.
    pub async fn delete_by_user(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
