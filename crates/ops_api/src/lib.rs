pub mod handlers;
pub mod routes;
pub mod session;

use ops_service::OpsService;

#[derive(Clone)]
pub struct AppState {
    pub service: OpsService,
    /// Public API key clients must present; checked before role resolution.
    pub api_key: String,
}
