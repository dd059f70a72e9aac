use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use discogs_random::{app, config::Config, discogs::DiscogsClient};

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), GenericError> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();
    if config.username.is_none() || config.token.is_none() {
        tracing::warn!(
            "DISCOGS_USERNAME/DISCOGS_TOKEN not set; /random will report a configuration error"
        );
    }

    let client = DiscogsClient::new(config);
    let router = app(client);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
