//! Middleware del sistema
//!
//! Este módulo contiene el middleware HTTP de la API local.

pub mod cors;

pub use cors::*;
