//! Cache local
//!
//! Espejo persistente del último estado conocido, usado como respaldo
//! cuando el backend primario no responde.

pub mod fallback_store;

pub use fallback_store::{FallbackStore, FALLBACK_KEY};
