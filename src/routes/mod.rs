pub mod projects;

use axum::Router;
use axum::routing::get;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/projects", get(projects::list).post(projects::create))
        .route(
            "/api/v1/projects/{project_id}",
            get(projects::read)
                .put(projects::update)
                .patch(projects::update)
                .delete(projects::delete),
        )
        // No identifier: the handlers answer 400.
        .route(
            "/api/v1/projects/",
            get(projects::read)
                .put(projects::update)
                .patch(projects::update)
                .delete(projects::delete),
        )
}
