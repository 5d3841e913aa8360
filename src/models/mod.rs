//! Modelos del sistema
//!
//! Vehículo vendido (quadriciclo) y sus tres revisiones programadas.

pub mod quadricycle;
pub mod review;

pub use quadricycle::{NewQuadricycle, Quadricycle, QuadricycleStatus};
pub use review::{Review, ReviewStatus, ReviewUpdate};
