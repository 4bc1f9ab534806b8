use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Project, ProjectPayload};
use crate::query::{OrderDirection, OrderField, ProjectQuery};
use crate::services::ProjectService;

/// In-memory store that counts every call.
#[derive(Default)]
pub struct MockProjectService {
    pub projects: Mutex<Vec<Project>>,
    pub read_all_calls: AtomicUsize,
    pub read_calls: AtomicUsize,
    pub save_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub last_query: Mutex<Option<ProjectQuery>>,
    pub last_saved: Mutex<Option<ProjectPayload>>,
    /// When set, every call fails with a pool timeout.
    pub fail: bool,
}

impl MockProjectService {
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> (usize, usize, usize, usize) {
        (
            self.read_all_calls.load(Ordering::SeqCst),
            self.read_calls.load(Ordering::SeqCst),
            self.save_calls.load(Ordering::SeqCst),
            self.delete_calls.load(Ordering::SeqCst),
        )
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn select(&self, query: &ProjectQuery) -> Vec<Project> {
        *self.last_query.lock().unwrap() = Some(query.clone());

        let mut rows: Vec<Project> = self
            .projects
            .lock()
            .unwrap()
            .iter()
            .filter(|p| query.filter.id.is_none_or(|id| p.id == id))
            .filter(|p| query.filter.completed.is_none_or(|c| p.completed == c))
            .cloned()
            .collect();

        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let ord = match order.field {
                    OrderField::Id => a.id.cmp(&b.id),
                    OrderField::Name => a.name.cmp(&b.name),
                    OrderField::Completed => a.completed.cmp(&b.completed),
                    OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
                    OrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                };
                let ord = match order.direction {
                    OrderDirection::Asc => ord,
                    OrderDirection::Desc => ord.reverse(),
                };
                ord.then_with(|| a.id.cmp(&b.id))
            });
        }

        if query.limit > 0 {
            rows.truncate(query.limit as usize);
        }
        rows
    }
}

pub fn project(name: &str, completed: bool) -> Project {
    let now = Utc::now();
    Project {
        id: Uuid::now_v7(),
        name: name.to_string(),
        description: None,
        completed,
        author_id: None,
        created_at: now,
        updated_at: now,
        author: None,
        tasks: None,
    }
}

#[async_trait]
impl ProjectService for MockProjectService {
    async fn read_all(&self, query: &ProjectQuery) -> Result<Vec<Project>, sqlx::Error> {
        self.read_all_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.select(query))
    }

    async fn read(&self, query: &ProjectQuery) -> Result<Option<Project>, sqlx::Error> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.select(query).into_iter().next())
    }

    async fn save(&self, payload: ProjectPayload) -> Result<Project, sqlx::Error> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        *self.last_saved.lock().unwrap() = Some(payload.clone());

        let mut projects = self.projects.lock().unwrap();
        let id = payload.id.unwrap_or_else(Uuid::now_v7);
        if let Some(existing) = projects.iter_mut().find(|p| p.id == id) {
            if let Some(name) = payload.name {
                existing.name = name;
            }
            if let Some(description) = payload.description {
                existing.description = Some(description);
            }
            if let Some(completed) = payload.completed {
                existing.completed = completed;
            }
            if let Some(author_id) = payload.author_id {
                existing.author_id = Some(author_id);
            }
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }

        let mut created = project(payload.name.as_deref().unwrap_or(""), payload.completed.unwrap_or(false));
        created.id = id;
        created.description = payload.description;
        created.author_id = payload.author_id;
        projects.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, project: &Project) -> Result<(), sqlx::Error> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.projects.lock().unwrap().retain(|p| p.id != project.id);
        Ok(())
    }
}
