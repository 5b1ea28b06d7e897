pub mod config;
pub mod handlers;
pub mod routes;

use std::sync::Arc;

use icsr_service::IcsrService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IcsrService>,
}

impl AppState {
    pub fn new(service: IcsrService) -> Self {
        Self { service: Arc::new(service) }
    }
}
