//! Shared application state
//!
//! Este módulo define el estado compartido de la API que se pasa
//! a través del router de Axum.

use sqlx::SqlitePool;

use crate::config::environment::EnvironmentConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }
}
