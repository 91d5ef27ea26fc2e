use anyhow::Context;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_reservation::{
    AppState,
    config::{Config, LogFormat},
    controllers::Console,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Invalid configuration")?;

    // Logs go to stderr so the prompts on stdout stay readable
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.app.rust_log));
    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    info!(environment = %config.app.environment, "Starting movie reservation console");

    let app_state = AppState::new(config).await;

    let mut console = Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    match console.run(&app_state.booking).await {
        Ok(Some(booking)) => info!(booking_id = %booking.id, "Session finished with a booking"),
        Ok(None) => info!("Session finished without a booking"),
        Err(e) => {
            error!(error = %e, "Console I/O failed");
            return Err(e).context("Console I/O failed");
        }
    }

    Ok(())
}
