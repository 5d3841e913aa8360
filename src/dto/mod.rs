pub mod quadricycle_dto;

pub use quadricycle_dto::{CreateQuadricycleRequest, StatusResponse, UpdateStatusRequest};
