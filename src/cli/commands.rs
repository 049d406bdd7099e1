use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vigia", about = "Neighborhood alert aggregation and AI reporting")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new alert
    Alert {
        /// Alert type (PANICO, ASALTO, ROBO_CASA, INCENDIO, ...)
        tipo: String,
        /// JSON data with user_id, descripcion, latitud, longitud, direccion,
        /// sector, comuna, ciudad, silenciosa
        json: String,
    },
    /// Change an alert's state; ATENDIDA stamps the attention fields
    Attend {
        /// Alert id
        id: String,
        /// New state (ACTIVA, EN_PROCESO, ATENDIDA, RESUELTA, FALSA_ALARMA)
        #[arg(long, default_value = "ATENDIDA")]
        estado: String,
        /// Attending admin id
        #[arg(long)]
        admin: String,
        /// Attention notes
        #[arg(long)]
        notas: Option<String>,
    },
    /// List alerts from the last N days
    Recent {
        #[arg(long, default_value = "7")]
        days: i64,
    },
    /// Show alert counters
    Stats,
    /// Generate the aggregate AI report
    Report {
        /// Range start (ISO-8601; defaults to the last 60 days)
        #[arg(long)]
        from: Option<String>,
        /// Range end (ISO-8601; defaults to the last 60 days)
        #[arg(long)]
        to: Option<String>,
        /// Alert type filter
        #[arg(long)]
        tipo: Option<String>,
        /// Alert state filter
        #[arg(long)]
        estado: Option<String>,
        /// Case-insensitive sector substring filter
        #[arg(long)]
        sector: Option<String>,
        /// Sample limit, clamped to [1, 500]
        #[arg(long, default_value = "100")]
        limite: i64,
    },
}
