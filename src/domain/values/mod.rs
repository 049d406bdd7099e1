pub mod alert_state;
pub mod alert_type;
