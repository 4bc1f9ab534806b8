use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}
