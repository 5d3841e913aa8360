//! Configuración del proyecto
//!
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! del servidor y la configuración del lado cliente.

pub mod client;
pub mod database;
pub mod environment;

pub use client::{BackendKind, ClientConfig};
pub use database::DatabaseConfig;
pub use environment::*;
