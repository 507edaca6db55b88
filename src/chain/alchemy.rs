use std::str::FromStr;

use alloy::primitives::utils::{format_ether, format_units};
use alloy::primitives::U256;
use chrono::Utc;
use futures_util::future::join_all;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::types::{NftPage, RawTokenBalance, RpcRequest, RpcResponse, TokenBalancesResult, TokenMetadata};
use super::{Chain, ChainError, WalletDataSource};
use crate::engine::scorer::{power_score, ScoreInputs};
use crate::models::{TokenBalance, WalletProfile};

/// Non-zero token balances resolved per wallet; each costs one metadata call.
const MAX_TOKEN_LOOKUPS: usize = 10;

/// Flat USD reference prices used to value holdings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub native_usd: f64,
    pub token_usd: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            native_usd: 3000.0,
            token_usd: 10.0,
        }
    }
}

/// Alchemy JSON-RPC + NFT API client.
#[derive(Debug, Clone)]
pub struct AlchemyClient {
    http: Client,
    api_key: Option<String>,
    endpoint: Option<String>,
    pricing: Pricing,
}

impl AlchemyClient {
    pub fn new(http: Client, api_key: Option<String>, pricing: Pricing) -> Self {
        Self {
            http,
            api_key,
            endpoint: None,
            pricing,
        }
    }

    /// Route every network through `endpoint/{network}` instead of
    /// `https://{network}.g.alchemy.com`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into().trim_end_matches('/').to_string());
        self
    }

    fn api_key(&self) -> Result<&str, ChainError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ChainError::MissingApiKey)
    }

    fn network_base(&self, chain: Chain) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/{}", chain.alchemy_network()),
            None => format!("https://{}.g.alchemy.com", chain.alchemy_network()),
        }
    }

    pub fn rpc_url(&self, chain: Chain) -> Result<String, ChainError> {
        Ok(format!("{}/v2/{}", self.network_base(chain), self.api_key()?))
    }

    pub fn nft_url(&self, chain: Chain) -> Result<String, ChainError> {
        Ok(format!("{}/nft/v2/{}/getNFTs", self.network_base(chain), self.api_key()?))
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: Value,
    ) -> Result<T, ChainError> {
        let resp = self
            .http
            .post(url)
            .json(&RpcRequest::new(method, params))
            .send()
            .await?
            .error_for_status()?;

        let body: RpcResponse<T> = resp.json().await?;
        if let Some(error) = body.error {
            return Err(ChainError::Rpc(error.to_string()));
        }
        body.result
            .ok_or_else(|| ChainError::Malformed(format!("{method} returned no result")))
    }

    async fn nft_count(&self, url: &str, address: &str) -> Result<u64, ChainError> {
        let url = format!("{url}?owner={address}&withMetadata=false&pageSize=1");
        let resp = self.http.get(&url).send().await?.error_for_status()?;

        let page: NftPage = resp.json().await?;
        Ok(page.total_count.unwrap_or(0))
    }

    /// Fetch balances, counts and token holdings for `address` and score them.
    ///
    /// `address` must already be normalized.
    pub async fn fetch_wallet(&self, address: &str, chain: Chain) -> Result<WalletProfile, ChainError> {
        let rpc_url = self.rpc_url(chain)?;
        let nft_url = self.nft_url(chain)?;

        let (tx_hex, balance_hex, balances, nft_count) = tokio::try_join!(
            self.rpc::<String>(&rpc_url, "eth_getTransactionCount", json!([address, "latest"])),
            self.rpc::<String>(&rpc_url, "eth_getBalance", json!([address, "latest"])),
            self.rpc::<TokenBalancesResult>(&rpc_url, "alchemy_getTokenBalances", json!([address])),
            self.nft_count(&nft_url, address),
        )?;

        let tx_count = parse_quantity(&tx_hex)?;
        let native_balance = format_ether(parse_u256(&balance_hex)?);
        let native_balance_usd = native_balance.parse::<f64>().unwrap_or(0.0) * self.pricing.native_usd;

        let erc20_balances = self.token_holdings(&rpc_url, &balances.token_balances).await;
        let token_value_usd: f64 = erc20_balances.iter().map(|t| t.value_usd).sum();

        let power_score = power_score(&ScoreInputs {
            tx_count,
            nft_count,
            token_value_usd,
            native_balance_usd,
        });

        tracing::debug!(
            address = %address,
            chain = %chain,
            tx_count,
            nft_count,
            tokens = erc20_balances.len(),
            power_score,
            "Wallet data fetched"
        );

        Ok(WalletProfile {
            wallet_address: address.to_string(),
            chain: chain.as_str().to_string(),
            resolved_name: None,
            native_balance,
            native_balance_usd,
            token_value_usd,
            nft_count,
            tx_count,
            erc20_balances,
            power_score,
            last_active_timestamp: Utc::now().timestamp_millis(),
        })
    }

    async fn token_holdings(&self, rpc_url: &str, raw: &[RawTokenBalance]) -> Vec<TokenBalance> {
        let candidates: Vec<(&RawTokenBalance, U256)> = raw
            .iter()
            .filter_map(|token| {
                let amount = parse_u256(token.token_balance.as_deref()?).ok()?;
                (!amount.is_zero()).then_some((token, amount))
            })
            .take(MAX_TOKEN_LOOKUPS)
            .collect();

        let lookups = candidates
            .iter()
            .map(|(token, amount)| self.token_holding(rpc_url, token, *amount));

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Resolve one token's symbol and decimals. Lookup failures skip the token.
    async fn token_holding(
        &self,
        rpc_url: &str,
        token: &RawTokenBalance,
        amount: U256,
    ) -> Option<TokenBalance> {
        let metadata: TokenMetadata = match self
            .rpc(rpc_url, "alchemy_getTokenMetadata", json!([token.contract_address]))
            .await
        {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(
                    contract = %token.contract_address,
                    error = %e,
                    "Failed to fetch token metadata"
                );
                return None;
            }
        };

        let decimals = metadata.decimals.filter(|d| *d > 0)?;
        let balance = format_units(amount, decimals).ok()?;
        let value_usd = balance.parse::<f64>().unwrap_or(0.0) * self.pricing.token_usd;

        Some(TokenBalance {
            symbol: metadata
                .symbol
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "UNKNOWN".into()),
            balance,
            value_usd,
        })
    }
}

impl WalletDataSource for AlchemyClient {
    async fn fetch_profile(&self, address: &str, chain: Chain) -> Result<WalletProfile, ChainError> {
        self.fetch_wallet(address, chain).await
    }
}

fn parse_u256(hex: &str) -> Result<U256, ChainError> {
    U256::from_str(hex.trim()).map_err(|_| ChainError::Malformed(format!("bad quantity: {hex}")))
}

fn parse_quantity(hex: &str) -> Result<u64, ChainError> {
    let digits = hex.trim().trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|_| ChainError::Malformed(format!("bad quantity: {hex}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x64").unwrap(), 100);
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x").unwrap(), 0);
        assert!(parse_quantity("0xnope").is_err());
    }

    #[test]
    fn test_urls_require_api_key() {
        let client = AlchemyClient::new(Client::new(), None, Pricing::default());
        assert!(matches!(client.rpc_url(Chain::Base), Err(ChainError::MissingApiKey)));
    }

    #[test]
    fn test_urls_per_network() {
        let client = AlchemyClient::new(Client::new(), Some("k".into()), Pricing::default());
        assert_eq!(
            client.rpc_url(Chain::Arbitrum).unwrap(),
            "https://arb-mainnet.g.alchemy.com/v2/k"
        );
        assert_eq!(
            client.nft_url(Chain::Ethereum).unwrap(),
            "https://eth-mainnet.g.alchemy.com/nft/v2/k/getNFTs"
        );

        let local = client.with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(
            local.rpc_url(Chain::Base).unwrap(),
            "http://127.0.0.1:9000/base-mainnet/v2/k"
        );
    }
}
