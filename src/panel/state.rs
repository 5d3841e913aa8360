//! Estado del panel de revisiones
//!
//! Contenedor único de la lista de vehículos que se muestra. Cada acción hace
//! una sola llamada a la fachada y solo actualiza la lista después de que
//! ésta responde.

use thiserror::Error;
use validator::ValidationErrors;

use crate::clients::BackendError;
use crate::models::{NewQuadricycle, Quadricycle, QuadricycleStatus, ReviewUpdate};
use crate::services::contact_service::whatsapp_link;
use crate::services::data_service::{DataService, Synced};
use crate::services::schedule_service::build_quadricycle;

/// Pestañas del panel, filtradas por estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Active,
    Completed,
}

impl Tab {
    pub fn status(&self) -> QuadricycleStatus {
        match self {
            Tab::Active => QuadricycleStatus::Active,
            Tab::Completed => QuadricycleStatus::Completed,
        }
    }
}

/// Confirmación síncrona del usuario antes de acciones destructivas
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Dados inválidos: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Quadriciclo não encontrado: {0}")]
    NotFound(String),

    #[error("Revisão {1} não encontrada no quadriciclo {0}")]
    ReviewNotFound(String, u32),

    #[error("Ainda há revisões pendentes para {0}")]
    ReviewsPending(String),

    #[error("Armazenamento indisponível: {0}")]
    Storage(#[from] BackendError),
}

pub struct PanelState {
    service: DataService,
    quads: Vec<Quadricycle>,
    tab: Tab,
    degraded: bool,
}

impl PanelState {
    pub fn new(service: DataService) -> Self {
        Self {
            service,
            quads: Vec::new(),
            tab: Tab::Active,
            degraded: false,
        }
    }

    pub fn service(&self) -> &DataService {
        &self.service
    }

    pub fn quadricycles(&self) -> &[Quadricycle] {
        &self.quads
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// La última operación solo quedó en el almacenamiento local
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Vehículos de la pestaña actual
    pub fn visible(&self) -> Vec<&Quadricycle> {
        self.in_tab(self.tab)
    }

    pub fn in_tab(&self, tab: Tab) -> Vec<&Quadricycle> {
        self.quads.iter().filter(|q| q.status == tab.status()).collect()
    }

    pub fn find(&self, id: &str) -> Result<&Quadricycle, PanelError> {
        self.quads
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Quadricycle, PanelError> {
        self.quads
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    fn track<T>(&mut self, synced: Synced<T>) -> T {
        self.degraded = synced.is_degraded();
        synced.value
    }

    pub async fn refresh(&mut self) -> Result<(), PanelError> {
        let synced = self.service.list_all().await?;
        self.quads = self.track(synced);
        Ok(())
    }

    /// Registrar una venta; el formulario se valida antes de persistir
    pub async fn register(&mut self, form: NewQuadricycle) -> Result<&Quadricycle, PanelError> {
        let quad = build_quadricycle(form)?;
        let synced = self.service.create(&quad).await?;
        self.track(synced);
        self.quads.insert(0, quad);
        Ok(&self.quads[0])
    }

    /// Devuelve `false` si el usuario no confirmó
    pub async fn delete(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, PanelError> {
        self.find(id)?;
        if !confirm.confirm("Tem certeza que deseja remover este quadriciclo?") {
            return Ok(false);
        }
        let synced = self.service.delete(id).await?;
        self.track(synced);
        self.quads.retain(|q| q.id != id);
        Ok(true)
    }

    /// Finalizar el ciclo: solo con todas las revisiones resueltas
    pub async fn finalize(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, PanelError> {
        let quad = self.find(id)?;
        if !quad.all_reviews_resolved() {
            return Err(PanelError::ReviewsPending(quad.client_name.clone()));
        }
        let prompt = format!(
            "Finalizar o ciclo de revisões de {} ({})?",
            quad.client_name, quad.model
        );
        if !confirm.confirm(&prompt) {
            return Ok(false);
        }
        self.set_status(id, QuadricycleStatus::Completed).await?;
        Ok(true)
    }

    /// Volver a activo está siempre disponible
    pub async fn reopen(&mut self, id: &str) -> Result<(), PanelError> {
        self.find(id)?;
        self.set_status(id, QuadricycleStatus::Active).await
    }

    async fn set_status(&mut self, id: &str, status: QuadricycleStatus) -> Result<(), PanelError> {
        let synced = self.service.set_status(id, status).await?;
        self.track(synced);
        self.find_mut(id)?.status = status;
        Ok(())
    }

    pub async fn complete_review(
        &mut self,
        id: &str,
        review_number: u32,
        observation: Option<String>,
        responsible: Option<String>,
        km: Option<String>,
    ) -> Result<(), PanelError> {
        self.update_review(id, review_number, ReviewUpdate::complete(observation, responsible, km))
            .await
    }

    pub async fn refuse_review(
        &mut self,
        id: &str,
        review_number: u32,
        reason: Option<String>,
        responsible: Option<String>,
    ) -> Result<(), PanelError> {
        self.update_review(id, review_number, ReviewUpdate::refuse(reason, responsible))
            .await
    }

    pub async fn clear_review(&mut self, id: &str, review_number: u32) -> Result<(), PanelError> {
        self.update_review(id, review_number, ReviewUpdate::clear()).await
    }

    async fn update_review(
        &mut self,
        id: &str,
        review_number: u32,
        update: ReviewUpdate,
    ) -> Result<(), PanelError> {
        if self.find(id)?.review(review_number).is_none() {
            return Err(PanelError::ReviewNotFound(id.to_string(), review_number));
        }
        let synced = self.service.update_review(id, review_number, &update).await?;
        self.track(synced);
        if let Some(review) = self.find_mut(id)?.review_mut(review_number) {
            review.apply(&update);
        }
        Ok(())
    }

    /// Enlace de WhatsApp general o sobre una revisión concreta
    pub fn contact_link(&self, id: &str, review_number: Option<u32>) -> Result<String, PanelError> {
        let quad = self.find(id)?;
        let review = match review_number {
            Some(number) => Some(
                quad.review(number)
                    .ok_or_else(|| PanelError::ReviewNotFound(id.to_string(), number))?,
            ),
            None => None,
        };
        Ok(whatsapp_link(quad, review))
    }
}
