//! Modelo de Review
//!
//! Una revisión es uno de los tres puntos de mantenimiento programados de un
//! quadriciclo. Los campos de identidad (`id`, `label`, `scheduledDate`,
//! `daysFromPrevious`) se fijan al crear el vehículo y nunca se actualizan.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Estado de visualización de una revisión (no se persiste)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    Completed,
    Overdue,
    Upcoming,
}

/// Review - mapea a la tabla reviews; `id` es el número de revisión (1..3)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u32,
    pub label: String,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub is_refused: bool,
    pub days_from_previous: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub km: Option<String>,
}

impl Review {
    /// Revisión pendiente, sin campos opcionales
    pub fn pending(id: u32, label: String, scheduled_date: NaiveDate, days_from_previous: i64) -> Self {
        Self {
            id,
            label,
            scheduled_date,
            is_completed: false,
            is_refused: false,
            days_from_previous,
            observation: None,
            refusal_reason: None,
            responsible: None,
            km: None,
        }
    }

    /// Realizada o recusada
    pub fn is_resolved(&self) -> bool {
        self.is_completed || self.is_refused
    }

    /// Estado para mostrar en el panel respecto a `now` (hora local).
    ///
    /// La fecha programada cuenta desde la medianoche de ese día, así que una
    /// revisión no resuelta pasa a `Overdue` en cuanto empieza su día.
    pub fn status_at(&self, now: NaiveDateTime) -> ReviewStatus {
        if self.is_resolved() {
            return ReviewStatus::Completed;
        }
        if self.scheduled_date.and_time(NaiveTime::MIN) < now {
            ReviewStatus::Overdue
        } else {
            ReviewStatus::Upcoming
        }
    }

    /// Aplicar una actualización parcial; solo cambian los campos presentes
    pub fn apply(&mut self, update: &ReviewUpdate) {
        let update = update.clone().normalized();
        if let Some(value) = update.is_completed {
            self.is_completed = value;
        }
        if let Some(value) = update.is_refused {
            self.is_refused = value;
        }
        if let Some(value) = update.observation {
            self.observation = value;
        }
        if let Some(value) = update.refusal_reason {
            self.refusal_reason = value;
        }
        if let Some(value) = update.responsible {
            self.responsible = value;
        }
        if let Some(value) = update.km {
            self.km = value;
        }
    }
}

/// Actualización parcial de una revisión.
///
/// Cada campo opcional tiene tres estados: ausente (`None`, no se toca),
/// `null` (`Some(None)`, se borra) o un valor (`Some(Some(v))`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_refused: Option<bool>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub observation: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub refusal_reason: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub responsible: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub km: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ReviewUpdate {
    /// Marcar como realizada; limpia el motivo de recusa
    pub fn complete(observation: Option<String>, responsible: Option<String>, km: Option<String>) -> Self {
        Self {
            is_completed: Some(true),
            is_refused: Some(false),
            observation: Some(non_blank(observation)),
            refusal_reason: Some(None),
            responsible: Some(non_blank(responsible)),
            km: Some(non_blank(km)),
        }
    }

    /// Marcar como recusada por el cliente; limpia observación y km
    pub fn refuse(reason: Option<String>, responsible: Option<String>) -> Self {
        Self {
            is_completed: Some(false),
            is_refused: Some(true),
            observation: Some(None),
            refusal_reason: Some(non_blank(reason)),
            responsible: Some(non_blank(responsible)),
            km: Some(None),
        }
    }

    /// Volver a pendiente sin campos residuales
    pub fn clear() -> Self {
        Self {
            is_completed: Some(false),
            is_refused: Some(false),
            observation: Some(None),
            refusal_reason: Some(None),
            responsible: Some(None),
            km: Some(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Pide realizada y recusada a la vez
    pub fn is_contradictory(&self) -> bool {
        self.is_completed == Some(true) && self.is_refused == Some(true)
    }

    /// Resolver en un sentido apaga el otro flag, y los textos vacíos se
    /// guardan como ausentes.
    pub fn normalized(mut self) -> Self {
        if self.is_completed == Some(true) && self.is_refused.is_none() {
            self.is_refused = Some(false);
        }
        if self.is_refused == Some(true) && self.is_completed.is_none() {
            self.is_completed = Some(false);
        }
        for field in [
            &mut self.observation,
            &mut self.refusal_reason,
            &mut self.responsible,
            &mut self.km,
        ] {
            if let Some(value) = field.take() {
                *field = Some(non_blank(value));
            }
        }
        self
    }
}
