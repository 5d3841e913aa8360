//! Panel de revisiones
//!
//! Capa de presentación: estado con pestañas y acciones, y renderizado en
//! texto para el binario `panel`.

pub mod state;
pub mod view;

pub use state::{Confirm, PanelError, PanelState, Tab};
