pub mod projects;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::models::{Project, ProjectPayload};
use crate::query::ProjectQuery;

pub use projects::PgProjectService;

/// Data-access collaborator behind the project routes.
#[async_trait]
pub trait ProjectService: Send + Sync {
    /// All projects matching the query, with requested relations loaded.
    async fn read_all(&self, query: &ProjectQuery) -> Result<Vec<Project>, sqlx::Error>;

    /// First project matching the query, if any.
    async fn read(&self, query: &ProjectQuery) -> Result<Option<Project>, sqlx::Error>;

    /// Upsert: inserts when the payload has no id, otherwise inserts or
    /// updates the row with that id. Returns the stored entity.
    async fn save(&self, payload: ProjectPayload) -> Result<Project, sqlx::Error>;

    async fn delete(&self, project: &Project) -> Result<(), sqlx::Error>;
}
