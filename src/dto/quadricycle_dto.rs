use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Quadricycle, QuadricycleStatus, Review};
use crate::utils::validation::{validate_not_empty, validate_whatsapp};

// Request para registrar un vehículo con sus revisiones ya calculadas
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuadricycleRequest {
    #[validate(length(min = 1, max = 64))]
    pub id: String,

    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub model: String,

    pub purchase_date: NaiveDate,

    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub client_name: String,

    #[validate(custom = "validate_whatsapp", length(max = 32))]
    pub whatsapp: String,

    #[serde(default)]
    pub status: QuadricycleStatus,

    #[validate(length(equal = 3))]
    pub reviews: Vec<Review>,
}

impl From<CreateQuadricycleRequest> for Quadricycle {
    fn from(request: CreateQuadricycleRequest) -> Self {
        let mut reviews = request.reviews;
        reviews.sort_by_key(|r| r.id);
        Self {
            id: request.id,
            model: request.model,
            purchase_date: request.purchase_date,
            client_name: request.client_name,
            whatsapp: request.whatsapp,
            status: request.status,
            reviews,
        }
    }
}

// Request para cambiar el estado del ciclo
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: QuadricycleStatus,
}

// Response de las mutaciones: `{"status": "ok"}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
