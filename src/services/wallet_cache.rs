use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use super::clock::Clock;
use crate::chain::Chain;
use crate::models::WalletProfile;

/// Default freshness window for fetched wallet data.
pub const DEFAULT_TTL_SECS: i64 = 600;

struct CacheEntry {
    profile: WalletProfile,
    stored_at: DateTime<Utc>,
}

/// Wallet snapshots keyed by `chain:address`, fresh for `ttl` after insert.
///
/// Stale entries are ignored on read and swept on every insert.
pub struct WalletCache<C> {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: C,
}

pub fn cache_key(chain: Chain, address: &str) -> String {
    format!("{}:{}", chain.as_str(), address.to_lowercase())
}

impl<C: Clock> WalletCache<C> {
    pub fn new(ttl: Duration, clock: C) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    pub fn get(&self, chain: Chain, address: &str) -> Option<WalletProfile> {
        let now = self.clock.now();
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&cache_key(chain, address))
            .filter(|entry| now - entry.stored_at < self.ttl)
            .map(|entry| entry.profile.clone())
    }

    pub fn insert(&self, chain: Chain, address: &str, profile: WalletProfile) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.retain(|_, entry| now - entry.stored_at < self.ttl);
        entries.insert(
            cache_key(chain, address),
            CacheEntry {
                profile,
                stored_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::ManualClock;
    use std::sync::Arc;

    fn profile(address: &str, score: i64) -> WalletProfile {
        WalletProfile {
            wallet_address: address.into(),
            chain: "base".into(),
            resolved_name: None,
            native_balance: "0.5".into(),
            native_balance_usd: 1500.0,
            token_value_usd: 0.0,
            nft_count: 1,
            tx_count: 10,
            erc20_balances: vec![],
            power_score: score,
            last_active_timestamp: 1_700_000_000_000,
        }
    }

    fn cache() -> (WalletCache<Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        (
            WalletCache::new(Duration::seconds(DEFAULT_TTL_SECS), clock.clone()),
            clock,
        )
    }

    #[test]
    fn test_hit_one_second_later_is_identical() {
        let (cache, clock) = cache();
        let stored = profile("0xabc", 321);
        cache.insert(Chain::Base, "0xabc", stored.clone());

        clock.advance(Duration::seconds(1));
        let hit = cache.get(Chain::Base, "0xabc").expect("fresh entry");

        assert_eq!(hit, stored);
        assert_eq!(
            serde_json::to_vec(&hit).unwrap(),
            serde_json::to_vec(&stored).unwrap()
        );
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (cache, clock) = cache();
        cache.insert(Chain::Base, "0xabc", profile("0xabc", 1));

        clock.advance(Duration::seconds(DEFAULT_TTL_SECS - 1));
        assert!(cache.get(Chain::Base, "0xabc").is_some());

        clock.advance(Duration::seconds(1));
        assert!(cache.get(Chain::Base, "0xabc").is_none());
    }

    #[test]
    fn test_key_is_chain_and_lowercased_address() {
        let (cache, _clock) = cache();
        cache.insert(Chain::Base, "0xABC", profile("0xabc", 1));

        assert!(cache.get(Chain::Base, "0xabc").is_some());
        assert!(cache.get(Chain::Polygon, "0xabc").is_none());
        assert_eq!(cache_key(Chain::Optimism, "0xDEF"), "optimism:0xdef");
    }

    #[test]
    fn test_reinsert_replaces_stale_entry() {
        let (cache, clock) = cache();
        cache.insert(Chain::Base, "0xabc", profile("0xabc", 1));
        clock.advance(Duration::seconds(DEFAULT_TTL_SECS + 5));
        cache.insert(Chain::Base, "0xabc", profile("0xabc", 2));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(Chain::Base, "0xabc").unwrap().power_score, 2);
    }

    #[test]
    fn test_insert_sweeps_expired_entries() {
        let (cache, clock) = cache();
        cache.insert(Chain::Base, "0xaaa", profile("0xaaa", 1));
        cache.insert(Chain::Base, "0xbbb", profile("0xbbb", 2));
        assert_eq!(cache.len(), 2);

        clock.advance(Duration::seconds(DEFAULT_TTL_SECS));
        cache.insert(Chain::Polygon, "0xccc", profile("0xccc", 3));

        assert_eq!(cache.len(), 1);
        assert!(cache.get(Chain::Polygon, "0xccc").is_some());
    }
}
