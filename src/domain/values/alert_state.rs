use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triage lifecycle of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertState {
    /// Just raised by a resident.
    #[serde(rename = "ACTIVA")]
    Active,
    /// Authorities notified.
    #[serde(rename = "EN_PROCESO")]
    InProgress,
    /// Someone is attending on site.
    #[serde(rename = "ATENDIDA")]
    Attended,
    /// Situation closed.
    #[serde(rename = "RESUELTA")]
    Resolved,
    #[serde(rename = "FALSA_ALARMA")]
    FalseAlarm,
}

impl AlertState {
    pub fn wire_name(&self) -> &'static str {
        match self {
            AlertState::Active => "ACTIVA",
            AlertState::InProgress => "EN_PROCESO",
            AlertState::Attended => "ATENDIDA",
            AlertState::Resolved => "RESUELTA",
            AlertState::FalseAlarm => "FALSA_ALARMA",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AlertState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVA" => Ok(AlertState::Active),
            "EN_PROCESO" => Ok(AlertState::InProgress),
            "ATENDIDA" => Ok(AlertState::Attended),
            "RESUELTA" => Ok(AlertState::Resolved),
            "FALSA_ALARMA" => Ok(AlertState::FalseAlarm),
            _ => Err(format!("Unknown alert state: {s}")),
        }
    }
}
