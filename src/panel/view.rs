//! Renderizado en texto de las tarjetas de vehículos y revisiones

use chrono::{Local, NaiveDateTime};

use crate::models::{Quadricycle, Review, ReviewStatus};
use crate::panel::state::PanelState;
use crate::utils::format_date_pt;

pub const EMPTY_LIST: &str = "Nenhum registro encontrado";

pub fn status_label(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Completed => "Concluída",
        ReviewStatus::Overdue => "Atrasada",
        ReviewStatus::Upcoming => "Próxima",
    }
}

/// "90 dias após a compra" / "180 dias após revisão anterior"
pub fn days_text(review: &Review) -> String {
    let reference = if review.id == 1 { "a compra" } else { "revisão anterior" };
    format!("{} dias após {}", review.days_from_previous, reference)
}

/// Línea de una revisión: número, etiqueta, fecha, estado y detalles
pub fn review_line(review: &Review, now: NaiveDateTime) -> String {
    let status = if review.is_refused {
        "Recusada"
    } else {
        status_label(review.status_at(now))
    };
    let mut line = format!(
        "  [{}] {} - {} ({}) - {}",
        review.id,
        review.label,
        format_date_pt(review.scheduled_date),
        days_text(review),
        status
    );

    let details: Vec<String> = [
        review.responsible.as_ref().map(|r| format!("responsável: {}", r)),
        review.km.as_ref().map(|km| format!("km: {}", km)),
        review.observation.as_ref().map(|o| format!("obs: {}", o)),
        review.refusal_reason.as_ref().map(|m| format!("motivo: {}", m)),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !details.is_empty() {
        line.push_str(&format!(" | {}", details.join(", ")));
    }
    line
}

pub fn quadricycle_card(index: usize, quad: &Quadricycle, now: NaiveDateTime) -> String {
    let mut card = format!(
        "{}. {} | {} | WhatsApp {} | Compra: {}",
        index,
        quad.model,
        quad.client_name,
        quad.whatsapp,
        format_date_pt(quad.purchase_date)
    );
    for review in &quad.reviews {
        card.push('\n');
        card.push_str(&review_line(review, now));
    }
    card
}

pub fn render_list(quads: &[&Quadricycle], now: NaiveDateTime) -> String {
    if quads.is_empty() {
        return EMPTY_LIST.to_string();
    }
    quads
        .iter()
        .enumerate()
        .map(|(i, quad)| quadricycle_card(i + 1, quad, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pestaña actual del panel según la hora local
pub fn render_tab(panel: &PanelState) -> String {
    render_list(&panel.visible(), Local::now().naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FallbackStore;
    use crate::models::{NewQuadricycle, QuadricycleStatus, ReviewUpdate};
    use crate::panel::state::Tab;
    use crate::services::data_service::DataService;
    use crate::services::schedule_service::compute_schedule;
    use chrono::{Duration, NaiveDate};

    fn quad() -> Quadricycle {
        let purchase = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Quadricycle {
            id: "q1".to_string(),
            model: "Yamaha Grizzly".to_string(),
            purchase_date: purchase,
            client_name: "Diego".to_string(),
            whatsapp: "11912345678".to_string(),
            status: QuadricycleStatus::Active,
            reviews: compute_schedule(purchase),
        }
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(10, 0, 0).unwrap()
    }

    #[test]
    fn test_days_text() {
        let q = quad();
        assert_eq!(days_text(&q.reviews[0]), "90 dias após a compra");
        assert_eq!(days_text(&q.reviews[1]), "180 dias após revisão anterior");
    }

    #[test]
    fn test_card_shows_overdue_and_upcoming() {
        let mut q = quad();
        q.reviews[0].apply(&ReviewUpdate::complete(None, Some("Ana".into()), Some("800".into())));
        let card = quadricycle_card(1, &q, at(2024, 10, 1));

        assert!(card.starts_with("1. Yamaha Grizzly | Diego"));
        assert!(card.contains("Compra: 01 de janeiro de 2024"));
        assert!(card.contains("[1] 1ª Revisão - 31 de março de 2024 (90 dias após a compra) - Concluída | responsável: Ana, km: 800"));
        assert!(card.contains("[2] 2ª Revisão - 27 de setembro de 2024"));
        assert!(card.contains("Atrasada"));
        assert!(card.contains("[3] 3ª Revisão - 26 de março de 2025 (180 dias após revisão anterior) - Próxima"));
    }

    #[test]
    fn test_refused_review_shows_reason() {
        let mut q = quad();
        q.reviews[2].apply(&ReviewUpdate::refuse(Some("Vendeu".into()), None));
        let line = review_line(&q.reviews[2], at(2024, 1, 2));
        assert!(line.ends_with("Recusada | motivo: Vendeu"));
    }

    #[test]
    fn test_resolved_review_past_its_date_is_not_overdue() {
        let mut q = quad();
        q.reviews[1].apply(&ReviewUpdate::refuse(Some("Sem tempo".into()), None));
        q.reviews[2].apply(&ReviewUpdate::complete(None, None, None));
        let now = at(2026, 1, 1);

        let refused = review_line(&q.reviews[1], now);
        assert!(refused.ends_with("- Recusada | motivo: Sem tempo"));
        assert!(!refused.contains("Atrasada"));
        assert!(!refused.contains("Concluída"));

        assert!(review_line(&q.reviews[2], now).ends_with("- Concluída"));
        assert!(review_line(&q.reviews[0], now).ends_with("- Atrasada"));
    }

    fn panel(dir: &std::path::Path) -> PanelState {
        PanelState::new(DataService::new(
            Box::new(FallbackStore::new(dir.join("primary"))),
            FallbackStore::new(dir.join("mirror")),
        ))
    }

    fn form(purchase_date: String) -> NewQuadricycle {
        NewQuadricycle {
            model: "Honda TRX 420".to_string(),
            purchase_date,
            client_name: "Diego".to_string(),
            whatsapp: "11912345678".to_string(),
        }
    }

    #[tokio::test]
    async fn test_render_tab_uses_local_clock() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel(dir.path());

        let id = panel.register(form("2000-01-01".to_string())).await.unwrap().id.clone();
        panel.refuse_review(&id, 2, Some("Vendeu".into()), None).await.unwrap();

        let rendered = render_tab(&panel);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("- Atrasada"));
        assert!(lines[2].ends_with("- Recusada | motivo: Vendeu"));
        assert!(lines[3].ends_with("- Atrasada"));
    }

    #[tokio::test]
    async fn test_render_tab_future_reviews_are_upcoming() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel(dir.path());
        let tomorrow = (Local::now().date_naive() + Duration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        panel.register(form(tomorrow)).await.unwrap();

        let rendered = render_tab(&panel);
        assert_eq!(rendered.matches("- Próxima").count(), 3);
        assert!(!rendered.contains("Atrasada"));

        panel.set_tab(Tab::Completed);
        assert_eq!(render_tab(&panel), EMPTY_LIST);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_list(&[], at(2024, 1, 1)), EMPTY_LIST);
    }
}
