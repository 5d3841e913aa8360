//! Controllers
//!
//! Capa de coordinación entre las rutas HTTP y los repositorios.

pub mod quadricycle_controller;

pub use quadricycle_controller::QuadricycleController;
