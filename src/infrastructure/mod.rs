pub mod ai;
pub mod sqlite;
