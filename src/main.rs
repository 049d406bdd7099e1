use clap::Parser;
use vigia::application::report::ReportRequest;
use vigia::cli::commands::{Cli, Commands};
use vigia::domain::values::alert_state::AlertState;
use vigia::domain::values::alert_type::AlertType;
use vigia::Vigia;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("VIGIA_DB").unwrap_or_else(|_| "./vigia.db".into());

    let app = match Vigia::new(&db_path) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing vigia: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(app, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: Vigia, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Alert { tipo, json } => {
            let alert_type: AlertType = tipo.parse().map_err(|e: String| e)?;
            let data: serde_json::Value = serde_json::from_str(&json)?;

            let user_id = data["user_id"]
                .as_str()
                .ok_or("Missing required field: user_id")?
                .to_string();
            let description = data["descripcion"].as_str().map(String::from);
            let latitude = data["latitud"].as_f64();
            let longitude = data["longitud"].as_f64();
            let address = data["direccion"].as_str().map(String::from);
            let sector = data["sector"].as_str().map(String::from);
            let comuna = data["comuna"].as_str().map(String::from);
            let city = data["ciudad"].as_str().map(String::from);
            let silent = data["silenciosa"].as_bool().unwrap_or(false);

            let alert = app.create_alert(
                user_id,
                alert_type,
                description,
                latitude,
                longitude,
                address,
                sector,
                comuna,
                city,
                silent,
            )?;
            println!("{}", serde_json::to_string_pretty(&alert)?);
        }
        Commands::Attend {
            id,
            estado,
            admin,
            notas,
        } => {
            let state: AlertState = estado.parse().map_err(|e: String| e)?;
            let alert = app.change_alert_state(&id, state, admin, notas)?;
            println!("{}", serde_json::to_string_pretty(&alert)?);
        }
        Commands::Recent { days } => {
            let alerts = app.recent_alerts(days)?;
            println!("{}", serde_json::to_string_pretty(&alerts)?);
        }
        Commands::Stats => {
            let stats = app.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Report {
            from,
            to,
            tipo,
            estado,
            sector,
            limite,
        } => {
            let request = ReportRequest {
                start: from,
                end: to,
                tipo,
                estado,
                sector,
                limite: Some(limite),
            };
            let report = app.report(&request).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
