use std::env;

use dotenvy::dotenv;

use ops_db::error::{Error, Result};

/// Environment configuration, loaded once at startup. A missing required
/// variable produces the `NotConfigured` sentinel before any network call,
/// so callers can tell "not set up" apart from real backend failures.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub api_key: String,
    pub project_ref: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| Error::NotConfigured("DATABASE_URL must be set".to_string()))?,

            api_key: env::var("OPS_API_KEY")
                .map_err(|_| Error::NotConfigured("OPS_API_KEY must be set".to_string()))?,

            project_ref: env::var("OPS_PROJECT_REF").ok(),
        })
    }
}
