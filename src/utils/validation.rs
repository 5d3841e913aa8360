//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! de entrada (formulario de registro y cuerpos de la API).

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref NON_DIGITS: Regex = Regex::new(r"\D").expect("static regex");
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Validador para `#[validate(custom)]` sobre la fecha de compra
pub fn validate_purchase_date(value: &str) -> Result<(), ValidationError> {
    validate_date(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Quitar todo lo que no sea dígito: "(11) 98765-4321" -> "11987654321"
pub fn digits_only(value: &str) -> String {
    NON_DIGITS.replace_all(value, "").into_owned()
}

/// El número de WhatsApp debe contener al menos un dígito
pub fn validate_whatsapp(value: &str) -> Result<(), ValidationError> {
    if digits_only(value).is_empty() {
        let mut error = ValidationError::new("whatsapp");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}
