use std::time::Instant;

use metrics::{counter, histogram};

use super::clock::Clock;
use super::wallet_cache::WalletCache;
use crate::chain::{normalize_address, Chain, ChainError, WalletDataSource};
use crate::models::WalletProfile;

/// Cache-fronted wallet fetcher.
pub struct WalletScanner<S, C> {
    source: S,
    cache: WalletCache<C>,
}

impl<S: WalletDataSource, C: Clock> WalletScanner<S, C> {
    pub fn new(source: S, cache: WalletCache<C>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &WalletCache<C> {
        &self.cache
    }

    /// Return a fresh cached snapshot or fetch a new one.
    ///
    /// Errors are never cached; a failed fetch leaves any previous entry alone.
    pub async fn fetch(&self, address: &str, chain: Chain) -> Result<WalletProfile, ChainError> {
        let address = normalize_address(address)?;

        if let Some(hit) = self.cache.get(chain, &address) {
            counter!("wallet_cache_hits_total").increment(1);
            tracing::debug!(address = %address, chain = %chain, "Wallet cache hit");
            return Ok(hit);
        }

        counter!("wallet_fetches_total").increment(1);
        let started = Instant::now();

        let profile = match self.source.fetch_profile(&address, chain).await {
            Ok(p) => p,
            Err(e) => {
                counter!("wallet_fetch_failures_total").increment(1);
                tracing::warn!(
                    address = %address,
                    chain = %chain,
                    error = %e,
                    "Wallet fetch failed"
                );
                return Err(e);
            }
        };

        histogram!("wallet_fetch_latency_seconds").record(started.elapsed().as_secs_f64());
        self.cache.insert(chain, &address, profile.clone());

        tracing::info!(
            address = %address,
            chain = %chain,
            power_score = profile.power_score,
            "Wallet scanned"
        );

        Ok(profile)
    }
}
