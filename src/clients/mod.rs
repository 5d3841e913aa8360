//! Clients - backends de persistencia
//!
//! Este módulo define el contrato común que cumplen la API local, las tablas
//! remotas y el espejo local, y los clientes HTTP de los dos primeros.

pub mod api_client;
pub mod remote_client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Quadricycle, QuadricycleStatus, ReviewUpdate};

pub use api_client::ApiBackend;
pub use remote_client::RemoteBackend;

/// Errores de cualquier backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Operaciones CRUD que expone cada backend
#[async_trait]
pub trait QuadricycleBackend: Send + Sync {
    /// Nombre corto para logs
    fn name(&self) -> &'static str;

    /// Sonda barata de disponibilidad
    async fn is_available(&self) -> bool;

    async fn list_all(&self) -> Result<Vec<Quadricycle>, BackendError>;

    async fn create(&self, quad: &Quadricycle) -> Result<(), BackendError>;

    async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), BackendError>;

    async fn delete(&self, id: &str) -> Result<(), BackendError>;

    async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<(), BackendError>;
}

/// Convertir respuestas no exitosas en `BackendError::Status`
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status { status, body })
}
