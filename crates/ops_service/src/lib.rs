pub mod bundles;
pub mod config;
pub mod documents;
pub mod forms;
pub mod ngos;
pub mod reports;
pub mod satellites;
pub mod work_items;

use sqlx::PgPool;

pub use config::Config;

#[derive(Clone)]
pub struct OpsService {
    pub pool: PgPool,
}

impl OpsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
