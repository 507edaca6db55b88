use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<Value>,
}

/// `alchemy_getTokenBalances` result.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesResult {
    #[serde(default)]
    pub token_balances: Vec<RawTokenBalance>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenBalance {
    pub contract_address: String,
    /// Hex-encoded raw amount; absent when Alchemy reports an error for the token.
    pub token_balance: Option<String>,
}

/// `alchemy_getTokenMetadata` result.
#[derive(Debug, Deserialize)]
pub struct TokenMetadata {
    pub decimals: Option<u8>,
    pub symbol: Option<String>,
}

/// NFT API `getNFTs` page; only the total is used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftPage {
    pub total_count: Option<u64>,
}
