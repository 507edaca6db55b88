pub mod api;
pub mod chain;
pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod lore;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use chrono::Duration;

use crate::chain::{AlchemyClient, Pricing};
use crate::config::AppConfig;
use crate::lore::{GeminiClient, LoreWriter};
use crate::services::{SystemClock, WalletCache, WalletScanner};

pub type Scanner = WalletScanner<AlchemyClient, SystemClock>;
pub type LoreService = LoreWriter<GeminiClient>;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub scanner: Arc<Scanner>,
    pub lore: Arc<LoreService>,
}

impl AppState {
    /// Wire the chain client, wallet cache and lore writer from config.
    pub fn new(
        db: sqlx::PgPool,
        config: AppConfig,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
        http: reqwest::Client,
    ) -> Self {
        let pricing = Pricing {
            native_usd: config.native_price_usd,
            token_usd: config.token_price_usd,
        };
        let mut alchemy = AlchemyClient::new(http.clone(), config.alchemy_api_key.clone(), pricing);
        if let Some(endpoint) = &config.alchemy_endpoint {
            alchemy = alchemy.with_endpoint(endpoint.clone());
        }

        let cache = WalletCache::new(Duration::seconds(config.wallet_cache_ttl_secs), SystemClock);
        let scanner = WalletScanner::new(alchemy, cache);

        let gemini = config.gemini_api_key.clone().map(|key| {
            let client = GeminiClient::new(http, key, config.gemini_model.clone());
            match &config.gemini_endpoint {
                Some(endpoint) => client.with_base_url(endpoint.clone()),
                None => client,
            }
        });
        if gemini.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; creatures will use deterministic lore");
        }

        Self {
            db,
            config,
            metrics_handle,
            scanner: Arc::new(scanner),
            lore: Arc::new(LoreWriter::new(gemini)),
        }
    }
}
