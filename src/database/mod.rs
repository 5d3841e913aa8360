//! Módulo de base de datos
//!
//! Maneja la conexión y el esquema de la base SQLite embebida

pub mod connection;
pub mod schema;

pub use connection::{run_migrations, DatabaseConnection};
