//! Enlace de contacto por WhatsApp
//!
//! Solo construye el enlace `wa.me` con el mensaje ya escrito; abrirlo es
//! responsabilidad de quien lo muestre. No se rastrea la entrega.

use crate::models::{Quadricycle, Review};
use crate::utils::dates::format_date_pt;
use crate::utils::validation::digits_only;

/// Prefijo con el código de país (Brasil)
pub const WHATSAPP_BASE_URL: &str = "https://wa.me/55";

/// Mensaje con el nombre del cliente, el modelo y, si aplica, la revisión
pub fn build_message(quad: &Quadricycle, review: Option<&Review>) -> String {
    let mut message = format!(
        "Olá {}! 👋\n\nEstamos entrando em contato sobre o seu quadriciclo *{}*.",
        quad.client_name, quad.model
    );

    match review {
        Some(review) => message.push_str(&format!(
            "\n\nLembramos que a sua *{}* está agendada para o dia *{}*.",
            review.label,
            format_date_pt(review.scheduled_date)
        )),
        None => message.push_str("\n\nComo podemos ajudar hoje?"),
    }

    message
}

/// `https://wa.me/55<dígitos>?text=<mensaje codificado>`
pub fn whatsapp_link(quad: &Quadricycle, review: Option<&Review>) -> String {
    let message = build_message(quad, review);
    format!(
        "{}{}?text={}",
        WHATSAPP_BASE_URL,
        digits_only(&quad.whatsapp),
        urlencoding::encode(&message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuadricycleStatus;
    use crate::services::schedule_service::compute_schedule;
    use chrono::NaiveDate;

    fn quad() -> Quadricycle {
        let purchase = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Quadricycle {
            id: "q-1".to_string(),
            model: "Honda TRX 420".to_string(),
            purchase_date: purchase,
            client_name: "Maria".to_string(),
            whatsapp: "(11) 98765-4321".to_string(),
            status: QuadricycleStatus::Active,
            reviews: compute_schedule(purchase),
        }
    }

    #[test]
    fn test_general_message() {
        let message = build_message(&quad(), None);
        assert!(message.starts_with("Olá Maria! 👋"));
        assert!(message.contains("*Honda TRX 420*"));
        assert!(message.ends_with("Como podemos ajudar hoje?"));
    }

    #[test]
    fn test_review_message() {
        let q = quad();
        let message = build_message(&q, q.review(1));
        assert!(message.contains("*1ª Revisão*"));
        assert!(message.contains("*31 de março de 2024*"));
        assert!(!message.contains("Como podemos ajudar"));
    }

    #[test]
    fn test_whatsapp_link() {
        let q = quad();
        let link = whatsapp_link(&q, None);
        assert!(link.starts_with("https://wa.me/5511987654321?text="));
        assert!(link.contains("Ol%C3%A1%20Maria"));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
    }
}
