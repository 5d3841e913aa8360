//! Generador del cronograma de revisiones
//!
//! A partir de la fecha de compra se derivan exactamente tres revisiones:
//! compra + 90 días, luego + 180 y + 180 sobre la anterior.

use chrono::{Duration, NaiveDate};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::models::{NewQuadricycle, Quadricycle, QuadricycleStatus, Review};
use crate::utils::validation::{digits_only, validate_date};

/// Días desde el hito anterior para cada revisión (1ª, 2ª, 3ª)
pub const REVIEW_OFFSETS: [i64; 3] = [90, 180, 180];

/// "1ª Revisão", "2ª Revisão", ...
pub fn review_label(number: u32) -> String {
    format!("{}ª Revisão", number)
}

/// Calcular las tres revisiones pendientes para una fecha de compra
pub fn compute_schedule(purchase_date: NaiveDate) -> Vec<Review> {
    let mut previous = purchase_date;
    REVIEW_OFFSETS
        .iter()
        .zip(1u32..)
        .map(|(&days, number)| {
            let scheduled = previous + Duration::days(days);
            previous = scheduled;
            Review::pending(number, review_label(number), scheduled, days)
        })
        .collect()
}

/// Construir un quadriciclo nuevo a partir del formulario de registro.
///
/// El id se genera en el cliente; el teléfono se guarda solo con dígitos.
pub fn build_quadricycle(form: NewQuadricycle) -> Result<Quadricycle, ValidationErrors> {
    form.validate()?;

    let purchase_date = validate_date(&form.purchase_date).map_err(|e| {
        let mut errors = ValidationErrors::new();
        errors.add("purchase_date", e);
        errors
    })?;

    Ok(Quadricycle {
        id: Uuid::new_v4().to_string(),
        model: form.model.trim().to_string(),
        purchase_date,
        client_name: form.client_name.trim().to_string(),
        whatsapp: digits_only(&form.whatsapp),
        status: QuadricycleStatus::Active,
        reviews: compute_schedule(purchase_date),
    })
}
