pub mod alert_repo;
pub mod migrations;
