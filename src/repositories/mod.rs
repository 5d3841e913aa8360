pub mod quadricycle_repository;

pub use quadricycle_repository::QuadricycleRepository;
