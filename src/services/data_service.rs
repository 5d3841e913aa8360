//! Fachada de persistencia
//!
//! Cada operación intenta primero el backend primario (API local o almacén
//! remoto). Si falla, se registra el error y la operación se aplica sobre el
//! espejo local, y al llamador se le informa éxito igualmente. El resultado
//! lleva el origen de los datos para poder mostrar el modo degradado.

use std::future::Future;

use crate::cache::FallbackStore;
use crate::clients::{ApiBackend, BackendError, QuadricycleBackend, RemoteBackend};
use crate::config::client::{BackendKind, ClientConfig};
use crate::models::{Quadricycle, QuadricycleStatus, ReviewUpdate};

/// Quién atendió la operación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Primary,
    Fallback,
}

/// Valor devuelto por la fachada junto con su origen
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<T> {
    pub value: T,
    pub source: DataSource,
}

impl<T> Synced<T> {
    fn primary(value: T) -> Self {
        Self { value, source: DataSource::Primary }
    }

    fn fallback(value: T) -> Self {
        Self { value, source: DataSource::Fallback }
    }

    /// La operación solo quedó en el espejo local
    pub fn is_degraded(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

pub struct DataService {
    primary: Box<dyn QuadricycleBackend>,
    mirror: FallbackStore,
}

impl DataService {
    pub fn new(primary: Box<dyn QuadricycleBackend>, mirror: FallbackStore) -> Self {
        Self { primary, mirror }
    }

    /// Elegir el backend primario según la configuración
    pub fn from_config(config: &ClientConfig) -> Result<Self, BackendError> {
        let primary: Box<dyn QuadricycleBackend> = match config.backend {
            BackendKind::Api => Box::new(ApiBackend::new(
                config.api_base_url.clone(),
                config.request_timeout,
            )?),
            BackendKind::Remote => {
                let (url, key) = config
                    .remote_url
                    .as_ref()
                    .zip(config.remote_api_key.as_ref())
                    .ok_or_else(|| {
                        BackendError::Configuration(
                            "SUPABASE_URL and SUPABASE_ANON_KEY are required for the remote backend"
                                .to_string(),
                        )
                    })?;
                Box::new(RemoteBackend::new(url.clone(), key.clone(), config.request_timeout)?)
            }
        };

        log::info!(
            "🔧 Fachada de datos: primario '{}', espejo en {}",
            primary.name(),
            config.fallback_dir.display()
        );
        Ok(Self::new(primary, FallbackStore::new(&config.fallback_dir)))
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn mirror(&self) -> &FallbackStore {
        &self.mirror
    }

    /// Consultar disponibilidad del primario (solo informativo)
    pub async fn probe(&self) -> bool {
        let available = self.primary.is_available().await;
        if available {
            log::info!("✅ Backend '{}' disponible", self.primary.name());
        } else {
            log::warn!(
                "⚠️ Backend '{}' no disponible, se trabajará con el almacenamiento local",
                self.primary.name()
            );
        }
        available
    }

    /// Lectura con refresco del espejo (último estado bueno conocido)
    pub async fn list_all(&self) -> Result<Synced<Vec<Quadricycle>>, BackendError> {
        match self.primary.list_all().await {
            Ok(quads) => {
                if let Err(e) = self.mirror.replace_all(&quads).await {
                    log::warn!("⚠️ No se pudo refrescar el espejo local: {}", e);
                }
                Ok(Synced::primary(quads))
            }
            Err(e) => {
                log::warn!(
                    "⚠️ '{}' no disponible al listar ({}), cargando desde el almacenamiento local",
                    self.primary.name(),
                    e
                );
                Ok(Synced::fallback(self.mirror.load().await?))
            }
        }
    }

    pub async fn create(&self, quad: &Quadricycle) -> Result<Synced<()>, BackendError> {
        let primary = self.primary.create(quad).await;
        self.write_through("create", primary, self.mirror.create(quad)).await
    }

    pub async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<Synced<()>, BackendError> {
        let primary = self.primary.set_status(id, status).await;
        self.write_through("set_status", primary, self.mirror.set_status(id, status))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Synced<()>, BackendError> {
        let primary = self.primary.delete(id).await;
        self.write_through("delete", primary, self.mirror.delete(id)).await
    }

    pub async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<Synced<()>, BackendError> {
        let primary = self.primary.update_review(quad_id, review_number, update).await;
        self.write_through(
            "update_review",
            primary,
            self.mirror.update_review(quad_id, review_number, update),
        )
        .await
    }

    /// La misma mutación se aplica siempre al espejo. Solo si el primario
    /// falló, un error del espejo se devuelve al llamador.
    async fn write_through<F>(
        &self,
        operation: &str,
        primary: Result<(), BackendError>,
        mirror: F,
    ) -> Result<Synced<()>, BackendError>
    where
        F: Future<Output = Result<(), BackendError>>,
    {
        match primary {
            Ok(()) => {
                if let Err(e) = mirror.await {
                    log::warn!("⚠️ {}: no se pudo reflejar en el espejo local: {}", operation, e);
                }
                Ok(Synced::primary(()))
            }
            Err(e) => {
                log::warn!(
                    "⚠️ {} falló en '{}' ({}), usando solo el almacenamiento local",
                    operation,
                    self.primary.name(),
                    e
                );
                mirror.await?;
                Ok(Synced::fallback(()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schedule_service::compute_schedule;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Backend en memoria que puede "caerse" a voluntad
    struct FlakyBackend {
        down: Arc<AtomicBool>,
        inner: FallbackStore,
    }

    impl FlakyBackend {
        fn check(&self) -> Result<(), BackendError> {
            if self.down.load(Ordering::SeqCst) {
                Err(BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "backend down",
                )))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl QuadricycleBackend for FlakyBackend {
        fn name(&self) -> &'static str {
            "flaky"
        }
        async fn is_available(&self) -> bool {
            self.check().is_ok()
        }
        async fn list_all(&self) -> Result<Vec<Quadricycle>, BackendError> {
            self.check()?;
            self.inner.list_all().await
        }
        async fn create(&self, quad: &Quadricycle) -> Result<(), BackendError> {
            self.check()?;
            self.inner.create(quad).await
        }
        async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), BackendError> {
            self.check()?;
            self.inner.set_status(id, status).await
        }
        async fn delete(&self, id: &str) -> Result<(), BackendError> {
            self.check()?;
            self.inner.delete(id).await
        }
        async fn update_review(
            &self,
            quad_id: &str,
            review_number: u32,
            update: &ReviewUpdate,
        ) -> Result<(), BackendError> {
            self.check()?;
            self.inner.update_review(quad_id, review_number, update).await
        }
    }

    fn quad(id: &str) -> Quadricycle {
        let purchase = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Quadricycle {
            id: id.to_string(),
            model: "Polaris Sportsman".to_string(),
            purchase_date: purchase,
            client_name: "Bruno".to_string(),
            whatsapp: "31988887777".to_string(),
            status: QuadricycleStatus::Active,
            reviews: compute_schedule(purchase),
        }
    }

    fn service(dir: &std::path::Path) -> (DataService, Arc<AtomicBool>) {
        let down = Arc::new(AtomicBool::new(false));
        let primary = FlakyBackend {
            down: down.clone(),
            inner: FallbackStore::new(dir.join("primary")),
        };
        (DataService::new(Box::new(primary), FallbackStore::new(dir.join("mirror"))), down)
    }

    #[tokio::test]
    async fn test_list_all_refreshes_mirror() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _down) = service(dir.path());
        service.create(&quad("a")).await.unwrap();
        // El espejo queda desfasado a propósito
        service.mirror().replace_all(&[]).await.unwrap();

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed.source, DataSource::Primary);
        assert_eq!(listed.value.len(), 1);
        assert_eq!(service.mirror().load().await.unwrap(), listed.value);
    }

    #[tokio::test]
    async fn test_writes_are_mirrored_when_primary_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _down) = service(dir.path());
        let created = service.create(&quad("a")).await.unwrap();
        assert!(!created.is_degraded());

        service
            .update_review("a", 1, &ReviewUpdate::complete(None, Some("Ana".into()), None))
            .await
            .unwrap();
        let mirrored = service.mirror().load().await.unwrap();
        assert!(mirrored[0].reviews[0].is_completed);
    }

    #[tokio::test]
    async fn test_delete_falls_back_and_reports_success() {
        let dir = tempfile::tempdir().unwrap();
        let (service, down) = service(dir.path());
        service.create(&quad("a")).await.unwrap();
        service.create(&quad("b")).await.unwrap();

        down.store(true, Ordering::SeqCst);
        let deleted = service.delete("a").await.unwrap();
        assert!(deleted.is_degraded());

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed.source, DataSource::Fallback);
        assert!(listed.value.iter().all(|q| q.id != "a"));
        assert_eq!(listed.value.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_writes_survive_until_next_primary_read() {
        let dir = tempfile::tempdir().unwrap();
        let (service, down) = service(dir.path());
        service.create(&quad("a")).await.unwrap();

        down.store(true, Ordering::SeqCst);
        let updated = service
            .set_status("a", QuadricycleStatus::Completed)
            .await
            .unwrap();
        assert!(updated.is_degraded());
        assert!(!service.probe().await);
        assert_eq!(
            service.list_all().await.unwrap().value[0].status,
            QuadricycleStatus::Completed
        );

        // El primario vuelve y su lectura sobrescribe el espejo
        down.store(false, Ordering::SeqCst);
        let listed = service.list_all().await.unwrap();
        assert_eq!(listed.value[0].status, QuadricycleStatus::Active);
        assert_eq!(service.mirror().load().await.unwrap()[0].status, QuadricycleStatus::Active);
    }

    #[test]
    fn test_remote_backend_requires_credentials() {
        let config = ClientConfig {
            backend: BackendKind::Remote,
            api_base_url: "http://localhost:3000/api".to_string(),
            remote_url: Some("https://example.supabase.co".to_string()),
            remote_api_key: None,
            fallback_dir: std::path::PathBuf::from("."),
            request_timeout: std::time::Duration::from_secs(1),
        };
        assert!(matches!(
            DataService::from_config(&config),
            Err(BackendError::Configuration(_))
        ));
    }
}
