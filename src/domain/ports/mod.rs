pub mod alert_repository;
pub mod narrative_generator;
