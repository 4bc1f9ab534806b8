mod project;
mod task;
mod user;

pub use project::{Project, ProjectPayload};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
