use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub balance: String,
    #[serde(rename = "valueUSD")]
    pub value_usd: f64,
}

/// On-chain snapshot of a wallet plus its derived power score.
///
/// Field names mirror the JSON the card frontend consumes, hence the
/// explicit `USD` renames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletProfile {
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default)]
    pub chain: String,
    #[serde(default)]
    pub resolved_name: Option<String>,
    #[serde(default)]
    pub native_balance: String,
    #[serde(rename = "nativeBalanceUSD", default)]
    pub native_balance_usd: f64,
    #[serde(rename = "tokenValueUSD", default)]
    pub token_value_usd: f64,
    #[serde(default)]
    pub nft_count: u64,
    #[serde(default)]
    pub tx_count: u64,
    #[serde(default)]
    pub erc20_balances: Vec<TokenBalance>,
    pub power_score: i64,
    /// Milliseconds since the Unix epoch at fetch time.
    #[serde(default)]
    pub last_active_timestamp: i64,
}

impl WalletProfile {
    /// Combined native + token holdings in USD.
    pub fn portfolio_value_usd(&self) -> f64 {
        self.native_balance_usd + self.token_value_usd
    }
}
