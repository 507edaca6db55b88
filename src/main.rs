use std::time::Duration;

use trainercard::api::router::create_router;
use trainercard::config::AppConfig;
use trainercard::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("Connecting to database...");
    let pool = db::init_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    if config.alchemy_api_key.is_none() {
        tracing::warn!("ALCHEMY_API_KEY not set; wallet scans will fail");
    }
    if config.trainer_profile_contract_address.is_none() {
        tracing::warn!("TRAINER_PROFILE_CONTRACT_ADDRESS not set; minting is disabled");
    }

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(20))
        .build()?;
    let metrics_handle = metrics::init_metrics();

    let state = AppState::new(pool, config, metrics_handle, http);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}
