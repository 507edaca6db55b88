use rust_decimal::Decimal;
use std::env;

use crate::services::wallet_cache::DEFAULT_TTL_SECS;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Chain data (optional; fetches fail with a configuration error without it)
    pub alchemy_api_key: Option<String>,
    pub alchemy_endpoint: Option<String>,

    // Lore generation (optional; deterministic lore when absent)
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: Option<String>,

    // Minting
    pub public_base_url: String,
    pub trainer_profile_contract_address: Option<String>,
    pub mint_fee_eth: Decimal,

    // Valuation and caching
    pub native_price_usd: f64,
    pub token_price_usd: f64,
    pub wallet_cache_ttl_secs: i64,
    pub leaderboard_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            alchemy_api_key: non_empty("ALCHEMY_API_KEY"),
            alchemy_endpoint: non_empty("ALCHEMY_ENDPOINT"),

            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            gemini_endpoint: non_empty("GEMINI_ENDPOINT"),

            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.into()),
            trainer_profile_contract_address: non_empty("TRAINER_PROFILE_CONTRACT_ADDRESS"),
            mint_fee_eth: env::var("MINT_FEE_ETH")
                .unwrap_or_else(|_| "0.001".into())
                .parse()
                .unwrap_or(Decimal::new(1, 3)),

            native_price_usd: env::var("NATIVE_PRICE_USD")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap_or(3000.0),
            token_price_usd: env::var("TOKEN_PRICE_USD")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10.0),
            wallet_cache_ttl_secs: env::var("WALLET_CACHE_TTL_SECS")
                .unwrap_or_else(|_| DEFAULT_TTL_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TTL_SECS),
            leaderboard_limit: env::var("LEADERBOARD_LIMIT")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
        })
    }

    /// Config with every optional integration switched off.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".into(),
            port: 0,
            alchemy_api_key: None,
            alchemy_endpoint: None,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.into(),
            gemini_endpoint: None,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.into(),
            trainer_profile_contract_address: None,
            mint_fee_eth: Decimal::new(1, 3),
            native_price_usd: 3000.0,
            token_price_usd: 10.0,
            wallet_cache_ttl_secs: DEFAULT_TTL_SECS,
            leaderboard_limit: 100,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
