use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{ListQuery, ProjectBody, ProjectId};
use crate::models::Project;
use crate::query::{
    OrderDirection, OrderField, ProjectFilter, ProjectOrder, ProjectQuery, Relation, parse_truthy,
};
use crate::response::Envelope;
use crate::state::SharedState;

const LIST_RELATIONS: &[Relation] = &[Relation::Author, Relation::Tasks, Relation::TaskStatus];

const READ_RELATIONS: &[Relation] = &[
    Relation::Author,
    Relation::Tasks,
    Relation::TaskPriority,
    Relation::TaskAssignee,
    Relation::TaskAuthor,
    Relation::TaskStatus,
];

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub completed: Option<String>,
    pub orderby: Option<String>,
    pub orderdir: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    fn into_query(self) -> Result<ProjectQuery, AppError> {
        let completed = non_empty(self.completed.as_deref()).map(parse_truthy);

        let orderby = non_empty(self.orderby.as_deref());
        let orderdir = non_empty(self.orderdir.as_deref());
        let order = if orderby.is_some() || orderdir.is_some() {
            ProjectOrder {
                field: orderby.map(OrderField::parse).unwrap_or(OrderField::Completed),
                direction: orderdir.map(OrderDirection::parse).unwrap_or(OrderDirection::Asc),
            }
        } else {
            ProjectOrder::default()
        };

        let limit = match non_empty(self.limit.as_deref()) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                AppError::BadRequest("limit must be a non-negative integer".to_string())
            })?,
            None => 0,
        };

        Ok(ProjectQuery {
            filter: ProjectFilter {
                id: None,
                completed,
            },
            order: Some(order),
            limit,
            relations: LIST_RELATIONS.to_vec(),
        })
    }
}

pub async fn list(
    State(state): State<SharedState>,
    ListQuery(params): ListQuery<ListParams>,
) -> Result<Envelope<Vec<Project>>, AppError> {
    let query = params.into_query()?;
    let projects = state.projects.read_all(&query).await?;
    Ok(Envelope::ok(projects))
}

/// Responds with `data: null` when no project matches.
pub async fn read(
    State(state): State<SharedState>,
    project_id: ProjectId,
) -> Result<Envelope<Option<Project>>, AppError> {
    let id = require_id(project_id)?;
    let project = state
        .projects
        .read(&by_id(id, READ_RELATIONS.to_vec()))
        .await?;
    Ok(Envelope::ok(project))
}

pub async fn create(
    State(state): State<SharedState>,
    ProjectBody(payload): ProjectBody,
) -> Result<Envelope<Project>, AppError> {
    let payload = payload.ok_or_else(missing_payload)?;
    let project = state.projects.save(payload).await?;
    tracing::info!(project_id = %project.id, "project created");
    Ok(Envelope::ok(project))
}

/// Saves the body payload as sent; the stored row is only used to check
/// existence.
pub async fn update(
    State(state): State<SharedState>,
    project_id: ProjectId,
    ProjectBody(payload): ProjectBody,
) -> Result<Envelope<Project>, AppError> {
    let id = require_id(project_id)?;
    let payload = payload.ok_or_else(missing_payload)?;

    state
        .projects
        .read(&by_id(id, Vec::new()))
        .await?
        .ok_or_else(not_found)?;

    let project = state.projects.save(payload).await?;
    tracing::info!(project_id = %project.id, "project updated");
    Ok(Envelope::ok(project))
}

pub async fn delete(
    State(state): State<SharedState>,
    project_id: ProjectId,
) -> Result<Response, AppError> {
    let id = require_id(project_id)?;

    let project = state
        .projects
        .read(&by_id(id, Vec::new()))
        .await?
        .ok_or_else(not_found)?;

    state.projects.delete(&project).await?;
    tracing::info!(project_id = %project.id, "project deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

fn require_id(ProjectId(project_id): ProjectId) -> Result<Uuid, AppError> {
    let raw = project_id
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("projectID is required".to_string()))?;
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid projectID: {raw}")))
}

fn by_id(id: Uuid, relations: Vec<Relation>) -> ProjectQuery {
    ProjectQuery {
        filter: ProjectFilter {
            id: Some(id),
            completed: None,
        },
        order: None,
        limit: 0,
        relations,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn missing_payload() -> AppError {
    AppError::BadRequest("project is required".to_string())
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}
