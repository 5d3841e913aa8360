//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y formato de fechas.

pub mod dates;
pub mod errors;
pub mod validation;

pub use dates::format_date_pt;
pub use errors::{AppError, AppResult};
