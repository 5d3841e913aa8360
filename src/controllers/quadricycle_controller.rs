use std::collections::HashSet;

use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::quadricycle_dto::CreateQuadricycleRequest;
use crate::models::{Quadricycle, QuadricycleStatus, ReviewUpdate};
use crate::repositories::quadricycle_repository::QuadricycleRepository;
use crate::utils::errors::{bad_request_error, AppResult};

pub struct QuadricycleController {
    repository: QuadricycleRepository,
}

impl QuadricycleController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repository: QuadricycleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Quadricycle>> {
        self.repository.find_all().await
    }

    pub async fn create(&self, request: CreateQuadricycleRequest) -> AppResult<()> {
        request.validate()?;

        // Las revisiones deben ser exactamente la 1ª, 2ª y 3ª
        let numbers: HashSet<u32> = request.reviews.iter().map(|r| r.id).collect();
        if numbers != HashSet::from([1, 2, 3]) {
            return Err(bad_request_error("Reviews must be numbered 1, 2 and 3"));
        }
        if request.reviews.iter().any(|r| r.is_completed && r.is_refused) {
            return Err(bad_request_error("A review cannot be completed and refused at the same time"));
        }

        let quad: Quadricycle = request.into();
        self.repository.insert(&quad).await?;
        log::info!("✅ Quadriciclo {} registrado para {}", quad.id, quad.client_name);
        Ok(())
    }

    pub async fn update_status(&self, id: &str, status: QuadricycleStatus) -> AppResult<()> {
        self.repository.update_status(id, status).await?;
        log::info!("🔄 Quadriciclo {} ahora está {}", id, status);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("🗑️ Quadriciclo {} eliminado", id);
        Ok(())
    }

    pub async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: ReviewUpdate,
    ) -> AppResult<()> {
        if update.is_contradictory() {
            return Err(bad_request_error("A review cannot be completed and refused at the same time"));
        }

        self.repository
            .update_review(quad_id, review_number, &update.normalized())
            .await?;
        log::info!("📝 Revisión {} del quadriciclo {} actualizada", review_number, quad_id);
        Ok(())
    }
}
