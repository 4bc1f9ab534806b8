use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Task, TaskPriority, TaskStatus};

pub async fn list_by_projects(pool: &PgPool, project_ids: &[Uuid]) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "SELECT id, project_id, title, status_id, priority_id, assignee_id, author_id,
                created_at, updated_at
         FROM tasks WHERE project_id = ANY($1) ORDER BY created_at ASC, id ASC",
    )
    .bind(project_ids)
    .fetch_all(pool)
    .await
}

pub async fn statuses_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<TaskStatus>, sqlx::Error> {
    sqlx::query_as::<_, TaskStatus>(
        "SELECT id, name, position FROM task_statuses WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

pub async fn priorities_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<TaskPriority>, sqlx::Error> {
    sqlx::query_as::<_, TaskPriority>(
        "SELECT id, name, level FROM task_priorities WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}
