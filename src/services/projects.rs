use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::models::{Project, ProjectPayload, Task, User};
use crate::query::{ProjectQuery, Relation};
use crate::services::ProjectService;

/// PostgreSQL-backed [`ProjectService`].
///
/// Relations are loaded with one batched query per relation after the
/// project rows are fetched, then attached in memory.
#[derive(Clone)]
pub struct PgProjectService {
    pool: PgPool,
}

impl PgProjectService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_relations(
        &self,
        projects: &mut [Project],
        query: &ProjectQuery,
    ) -> Result<(), sqlx::Error> {
        if projects.is_empty() {
            return Ok(());
        }

        let mut tasks = if query.includes_tasks() {
            let project_ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
            db::tasks::list_by_projects(&self.pool, &project_ids).await?
        } else {
            Vec::new()
        };

        let mut user_ids = HashSet::new();
        if query.includes(Relation::Author) {
            user_ids.extend(projects.iter().filter_map(|p| p.author_id));
        }
        if query.includes(Relation::TaskAssignee) {
            user_ids.extend(tasks.iter().filter_map(|t| t.assignee_id));
        }
        if query.includes(Relation::TaskAuthor) {
            user_ids.extend(tasks.iter().filter_map(|t| t.author_id));
        }
        let users = self.users_by_id(user_ids).await?;

        if query.includes(Relation::TaskStatus) {
            let ids = distinct(tasks.iter().filter_map(|t| t.status_id));
            let statuses: HashMap<_, _> = db::tasks::statuses_by_ids(&self.pool, &ids)
                .await?
                .into_iter()
                .map(|s| (s.id, s))
                .collect();
            for task in &mut tasks {
                task.status = task.status_id.and_then(|id| statuses.get(&id).cloned());
            }
        }

        if query.includes(Relation::TaskPriority) {
            let ids = distinct(tasks.iter().filter_map(|t| t.priority_id));
            let priorities: HashMap<_, _> = db::tasks::priorities_by_ids(&self.pool, &ids)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect();
            for task in &mut tasks {
                task.priority = task.priority_id.and_then(|id| priorities.get(&id).cloned());
            }
        }

        for task in &mut tasks {
            if query.includes(Relation::TaskAssignee) {
                task.assignee = task.assignee_id.and_then(|id| users.get(&id).cloned());
            }
            if query.includes(Relation::TaskAuthor) {
                task.author = task.author_id.and_then(|id| users.get(&id).cloned());
            }
        }

        let mut tasks_by_project: HashMap<Uuid, Vec<Task>> = HashMap::new();
        for task in tasks {
            tasks_by_project.entry(task.project_id).or_default().push(task);
        }

        for project in projects.iter_mut() {
            if query.includes(Relation::Author) {
                project.author = project.author_id.and_then(|id| users.get(&id).cloned());
            }
            if query.includes_tasks() {
                project.tasks = Some(tasks_by_project.remove(&project.id).unwrap_or_default());
            }
        }

        Ok(())
    }

    async fn users_by_id(&self, ids: HashSet<Uuid>) -> Result<HashMap<Uuid, User>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<Uuid> = ids.into_iter().collect();
        let users = db::users::find_by_ids(&self.pool, &ids).await?;
        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}

#[async_trait]
impl ProjectService for PgProjectService {
    async fn read_all(&self, query: &ProjectQuery) -> Result<Vec<Project>, sqlx::Error> {
        let mut projects =
            db::projects::list(&self.pool, &query.filter, query.order, query.limit).await?;
        self.load_relations(&mut projects, query).await?;
        Ok(projects)
    }

    async fn read(&self, query: &ProjectQuery) -> Result<Option<Project>, sqlx::Error> {
        let mut projects = db::projects::list(&self.pool, &query.filter, query.order, 1).await?;
        self.load_relations(&mut projects, query).await?;
        Ok(projects.into_iter().next())
    }

    async fn save(&self, payload: ProjectPayload) -> Result<Project, sqlx::Error> {
        let id = payload.id.unwrap_or_else(Uuid::now_v7);
        let project = db::projects::upsert(&self.pool, id, &payload).await?;
        tracing::debug!(project_id = %project.id, "project saved");
        Ok(project)
    }

    async fn delete(&self, project: &Project) -> Result<(), sqlx::Error> {
        db::projects::delete(&self.pool, project.id).await?;
        tracing::debug!(project_id = %project.id, "project deleted");
        Ok(())
    }
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    ids.collect::<HashSet<_>>().into_iter().collect()
}
