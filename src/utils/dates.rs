//! Formato de fechas para el panel y los mensajes al cliente (pt-BR)

use chrono::{Datelike, NaiveDate};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// "31 de março de 2024"
pub fn format_date_pt(date: NaiveDate) -> String {
    format!(
        "{:02} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_pt() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(format_date_pt(date), "31 de março de 2024");

        let date = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert_eq!(format_date_pt(date), "05 de dezembro de 2025");
    }
}
