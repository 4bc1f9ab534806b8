use std::sync::Arc;

use crate::config::Config;
use crate::services::ProjectService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub projects: Arc<dyn ProjectService>,
    pub config: Config,
}
