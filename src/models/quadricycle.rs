//! Modelo de Quadricycle
//!
//! Este módulo contiene el vehículo vendido, su estado de ciclo y el
//! formulario de registro que lo origina.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::review::Review;
use crate::utils::validation::{validate_not_empty, validate_purchase_date, validate_whatsapp};

/// Estado del ciclo de revisiones del vehículo
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum QuadricycleStatus {
    #[default]
    Active,
    Completed,
}

impl QuadricycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuadricycleStatus::Active => "active",
            QuadricycleStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for QuadricycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuadricycleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(QuadricycleStatus::Active),
            "completed" => Ok(QuadricycleStatus::Completed),
            other => Err(format!("Unknown quadricycle status: {}", other)),
        }
    }
}

/// Quadricycle principal con sus tres revisiones ordenadas por número
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Quadricycle {
    pub id: String,
    pub model: String,
    pub purchase_date: NaiveDate,
    pub client_name: String,
    pub whatsapp: String,
    #[serde(default)]
    pub status: QuadricycleStatus,
    pub reviews: Vec<Review>,
}

impl Quadricycle {
    pub fn review(&self, number: u32) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == number)
    }

    pub fn review_mut(&mut self, number: u32) -> Option<&mut Review> {
        self.reviews.iter_mut().find(|r| r.id == number)
    }

    /// Todas las revisiones realizadas o recusadas
    pub fn all_reviews_resolved(&self) -> bool {
        !self.reviews.is_empty() && self.reviews.iter().all(Review::is_resolved)
    }

    /// Solo se ofrece finalizar un ciclo activo sin revisiones pendientes
    pub fn can_finalize(&self) -> bool {
        self.status == QuadricycleStatus::Active && self.all_reviews_resolved()
    }
}

/// Formulario de registro de una venta
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewQuadricycle {
    #[validate(custom = "validate_not_empty")]
    pub model: String,

    #[validate(custom = "validate_purchase_date")]
    pub purchase_date: String,

    #[validate(custom = "validate_not_empty")]
    pub client_name: String,

    #[validate(custom = "validate_whatsapp")]
    pub whatsapp: String,
}
