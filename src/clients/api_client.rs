//! Cliente HTTP para la API local (`/api/quadricycles`)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::clients::{ensure_success, BackendError, QuadricycleBackend};
use crate::dto::quadricycle_dto::UpdateStatusRequest;
use crate::models::{Quadricycle, QuadricycleStatus, ReviewUpdate};

pub struct ApiBackend {
    client: Client,
    base_url: String,
}

impl ApiBackend {
    /// `base_url` apunta al origen de la API, p. ej. `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/quadricycles", self.base_url)
    }

    fn quadricycle_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }
}

#[async_trait]
impl QuadricycleBackend for ApiBackend {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn is_available(&self) -> bool {
        match self.client.head(self.collection_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("🔌 API no disponible: {}", e);
                false
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<Quadricycle>, BackendError> {
        let response = self.client.get(self.collection_url()).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create(&self, quad: &Quadricycle) -> Result<(), BackendError> {
        let response = self
            .client
            .post(self.collection_url())
            .json(quad)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn set_status(&self, id: &str, status: QuadricycleStatus) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.quadricycle_url(id))
            .json(&UpdateStatusRequest { status })
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        let response = self.client.delete(self.quadricycle_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn update_review(
        &self,
        quad_id: &str,
        review_number: u32,
        update: &ReviewUpdate,
    ) -> Result<(), BackendError> {
        let url = format!("{}/reviews/{}", self.quadricycle_url(quad_id), review_number);
        let response = self.client.put(url).json(update).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}
