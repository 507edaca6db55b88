pub mod alchemy;
pub mod types;

pub use alchemy::{AlchemyClient, Pricing};

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::models::WalletProfile;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("Invalid Ethereum address: {0}")]
    InvalidAddress(String),

    #[error("ALCHEMY_API_KEY not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Chain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Ethereum,
    Base,
    Polygon,
    Arbitrum,
    Optimism,
}

impl Chain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Base => "base",
            Chain::Polygon => "polygon",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
        }
    }

    /// Alchemy network subdomain for this chain.
    pub fn alchemy_network(&self) -> &'static str {
        match self {
            Chain::Ethereum => "eth-mainnet",
            Chain::Base => "base-mainnet",
            Chain::Polygon => "polygon-mainnet",
            Chain::Arbitrum => "arb-mainnet",
            Chain::Optimism => "opt-mainnet",
        }
    }
}

impl FromStr for Chain {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ethereum" => Ok(Chain::Ethereum),
            "base" => Ok(Chain::Base),
            "polygon" => Ok(Chain::Polygon),
            "arbitrum" => Ok(Chain::Arbitrum),
            "optimism" => Ok(Chain::Optimism),
            _ => Err(ChainError::UnsupportedChain(s.to_string())),
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate an EVM address and return it lowercased with a `0x` prefix.
///
/// Mixed-case input must carry a valid EIP-55 checksum; all-lower or
/// all-upper input is accepted as-is.
pub fn normalize_address(raw: &str) -> Result<String, ChainError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let mixed_case = digits.chars().any(|c| c.is_ascii_lowercase())
        && digits.chars().any(|c| c.is_ascii_uppercase());

    let parsed = if mixed_case {
        Address::parse_checksummed(format!("0x{digits}"), None).ok()
    } else {
        Address::from_str(digits).ok()
    };

    parsed
        .map(|address| address.to_string().to_lowercase())
        .ok_or_else(|| ChainError::InvalidAddress(raw.to_string()))
}

/// Source of on-chain wallet snapshots.
pub trait WalletDataSource: Send + Sync {
    fn fetch_profile(
        &self,
        address: &str,
        chain: Chain,
    ) -> impl Future<Output = Result<WalletProfile, ChainError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_parse_is_case_insensitive() {
        assert_eq!("Base".parse::<Chain>().unwrap(), Chain::Base);
        assert_eq!("ETHEREUM".parse::<Chain>().unwrap(), Chain::Ethereum);
    }

    #[test]
    fn test_unsupported_chain() {
        let err = "solana".parse::<Chain>().unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedChain(_)));
        assert_eq!(err.to_string(), "Unsupported chain: solana");
    }

    #[test]
    fn test_normalize_lowercases() {
        let addr = normalize_address("0xD8DA6BF26964AF9D7EED9E03E53415D37AA96045").unwrap();
        assert_eq!(addr, "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn test_normalize_accepts_valid_checksum() {
        let addr = normalize_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap();
        assert_eq!(addr, "0xd8da6bf26964af9d7eed9e03e53415d37aa96045");
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        assert!(normalize_address("").is_err());
        assert!(normalize_address("0x1234").is_err());
        assert!(normalize_address("0xzzzz6bf26964af9d7eed9e03e53415d37aa96045").is_err());
        // Mixed case with a broken checksum
        assert!(normalize_address("0xD8dA6BF26964aF9D7eEd9e03E53415D37aA96045").is_err());
    }
}
