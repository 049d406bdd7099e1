use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of alert types. Wire names match the upstream mobile clients,
/// which send Spanish SCREAMING_SNAKE identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "PANICO")]
    Panic,
    #[serde(rename = "PANICO_SILENCIOSO")]
    SilentPanic,
    #[serde(rename = "ASALTO")]
    Assault,
    #[serde(rename = "ROBO_CASA")]
    HomeBurglary,
    #[serde(rename = "ROBO_VEHICULO")]
    VehicleTheft,
    #[serde(rename = "INCENDIO")]
    Fire,
    #[serde(rename = "EMERGENCIA_MEDICA")]
    MedicalEmergency,
    #[serde(rename = "PERSONA_SOSPECHOSA")]
    SuspiciousPerson,
}

impl AlertType {
    pub fn wire_name(&self) -> &'static str {
        match self {
            AlertType::Panic => "PANICO",
            AlertType::SilentPanic => "PANICO_SILENCIOSO",
            AlertType::Assault => "ASALTO",
            AlertType::HomeBurglary => "ROBO_CASA",
            AlertType::VehicleTheft => "ROBO_VEHICULO",
            AlertType::Fire => "INCENDIO",
            AlertType::MedicalEmergency => "EMERGENCIA_MEDICA",
            AlertType::SuspiciousPerson => "PERSONA_SOSPECHOSA",
        }
    }

    /// Display title shown to residents.
    pub fn title(&self) -> &'static str {
        match self {
            AlertType::Panic => "Pánico",
            AlertType::SilentPanic => "Pánico Silencioso",
            AlertType::Assault => "Asalto",
            AlertType::HomeBurglary => "Robo de Casa",
            AlertType::VehicleTheft => "Robo de Vehículo",
            AlertType::Fire => "Incendio",
            AlertType::MedicalEmergency => "Emergencia Médica",
            AlertType::SuspiciousPerson => "Persona Sospechosa",
        }
    }

    /// Default description used when an alert is created without one.
    pub fn default_description(&self) -> &'static str {
        match self {
            AlertType::Panic => "Se ha generado una alerta de pánico",
            AlertType::SilentPanic => "Se ha generado una alerta silenciosa",
            AlertType::Assault => "Se ha reportado un asalto en curso",
            AlertType::HomeBurglary => "Se ha detectado un intento de robo a propiedad",
            AlertType::VehicleTheft => "Se ha reportado un robo de vehículo",
            AlertType::Fire => "Se ha reportado un incendio en la zona",
            AlertType::MedicalEmergency => "Se requiere asistencia médica urgente",
            AlertType::SuspiciousPerson => "Se ha detectado actividad sospechosa",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PANICO" => Ok(AlertType::Panic),
            "PANICO_SILENCIOSO" => Ok(AlertType::SilentPanic),
            "ASALTO" => Ok(AlertType::Assault),
            "ROBO_CASA" => Ok(AlertType::HomeBurglary),
            "ROBO_VEHICULO" => Ok(AlertType::VehicleTheft),
            "INCENDIO" => Ok(AlertType::Fire),
            "EMERGENCIA_MEDICA" => Ok(AlertType::MedicalEmergency),
            "PERSONA_SOSPECHOSA" => Ok(AlertType::SuspiciousPerson),
            _ => Err(format!("Unknown alert type: {s}")),
        }
    }
}
