use products_api::{app::App, types::Config};
use tracing_subscriber::prelude::*;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let app = match App::new(config).await {
        Ok(app) => app,
        Err(err) => {
            tracing::error!("Failed to initialise application: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = app.serve().await {
        tracing::error!("Server stopped unexpectedly: {}", err);
        std::process::exit(1);
    }
}
