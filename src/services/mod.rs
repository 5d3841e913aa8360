//! Services module
//!
//! Este módulo contiene la lógica de negocio: el cronograma de revisiones,
//! el enlace de contacto y la fachada de persistencia con respaldo local.

pub mod contact_service;
pub mod data_service;
pub mod schedule_service;

pub use contact_service::{build_message, whatsapp_link};
pub use data_service::{DataService, DataSource, Synced};
pub use schedule_service::{build_quadricycle, compute_schedule};
