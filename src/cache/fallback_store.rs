//! Espejo local de último recurso
//!
//! Guarda la lista completa de vehículos serializada bajo una única clave
//! (`quadricycles_data`), en un archivo JSON. La fachada lo refresca con cada
//! lectura exitosa del backend primario y lo usa cuando éste falla.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::clients::{BackendError, QuadricycleBackend};
use crate::models::{Quadricycle, QuadricycleStatus, ReviewUpdate};

/// Clave única del espejo
pub const FALLBACK_KEY: &str = "quadricycles_data";

pub struct FallbackStore {
    path: PathBuf,
    // Serializa las secuencias leer-modificar-escribir
    lock: Mutex<()>,
}

impl FallbackStore {
    /// El archivo vive en `<dir>/quadricycles_data.json`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", FALLBACK_KEY)),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sin archivo todavía equivale a lista vacía
    pub async fn load(&self) -> Result<Vec<Quadricycle>, BackendError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Reemplazar el contenido completo (refresco tras una lectura remota)
    pub async fn replace_all(&self, quads: &[Quadricycle]) -> Result<(), BackendError> {
        let _guard = self.lock.lock().await;
        self.write(quads).await
    }

    async fn write(&self, quads: &[Quadricycle]) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(quads)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn modify<F>(&self, mutate: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut Vec<Quadricycle>) + Send,
    {
        let _guard = self.lock.lock().await;
        let mut quads = self.load().await?;
        mutate(&mut quads);
        self.write(&quads).await
    }
}

#[async_trait]
impl QuadricycleBackend for FallbackStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn list_all(&self) -> Result<Vec<Quadricycle>, BackendError> {
        self.load().await
    }

    /// El nuevo va primero; un id repetido reemplaza al anterior
    async fn create(&self, quad: &Quadricycle) -> Result<(), BackendError> {
        let quad = quad.clone();
        self.modify(move |quads| {
            quads.retain(|q| q.id != quad.id);
            quads.insert(0, quad);
        })
        .await
    }

    async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), BackendError> {
        self.modify(|quads| {
            if let Some(quad) = quads.iter_mut().find(|q| q.id == id) {
                quad.status = status;
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.modify(|quads| quads.retain(|q| q.id != id)).await
    }

    async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<(), BackendError> {
        self.modify(|quads| {
            if let Some(review) = quads
                .iter_mut()
                .find(|q| q.id == quad_id)
                .and_then(|q| q.review_mut(review_number))
            {
                review.apply(update);
            }
        })
        .await
    }
}
