//! Revisões de Quadriciclos
//!
//! Seguimiento del cronograma de revisiones de mantenimiento de
//! quadriciclos vendidos: API local sobre SQLite, clientes para los backends
//! de persistencia, espejo local de respaldo y panel de terminal.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod panel;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
