use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{Project, ProjectPayload};
use crate::query::{ProjectFilter, ProjectOrder};

const COLUMNS: &str = "id, name, description, completed, author_id, created_at, updated_at";

/// Filtered, ordered and capped project rows without relations.
pub async fn list(
    pool: &PgPool,
    filter: &ProjectFilter,
    order: Option<ProjectOrder>,
    limit: u32,
) -> Result<Vec<Project>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM projects WHERE TRUE"));

    if let Some(id) = filter.id {
        qb.push(" AND id = ").push_bind(id);
    }
    if let Some(completed) = filter.completed {
        qb.push(" AND completed = ").push_bind(completed);
    }

    if let Some(order) = order {
        // Column and keyword come from closed enums, never from input.
        qb.push(format!(
            " ORDER BY {} {}, id ASC",
            order.field.column(),
            order.direction.keyword()
        ));
    }

    if limit > 0 {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }

    qb.build_query_as::<Project>().fetch_all(pool).await
}

/// Insert, or update the row with the same id. Absent payload fields keep
/// the stored value on update and the column default on insert.
pub async fn upsert(pool: &PgPool, id: Uuid, payload: &ProjectPayload) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        "INSERT INTO projects (id, name, description, completed, author_id)
         VALUES ($1, COALESCE($2, ''), $3, COALESCE($4, FALSE), $5)
         ON CONFLICT (id) DO UPDATE SET
             name = COALESCE($2, projects.name),
             description = COALESCE($3, projects.description),
             completed = COALESCE($4, projects.completed),
             author_id = COALESCE($5, projects.author_id),
             updated_at = now()
         RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(payload.name.as_deref())
    .bind(payload.description.as_deref())
    .bind(payload.completed)
    .bind(payload.author_id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
