use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::wallet::WalletProfile;

/// Database row for the trainers table (one per wallet).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: Uuid,
    pub wallet_address: String,
    pub chain: String,
    pub resolved_name: Option<String>,
    #[serde(rename = "nativeBalanceUSD")]
    pub native_balance_usd: f64,
    #[serde(rename = "tokenValueUSD")]
    pub token_value_usd: f64,
    pub nft_count: i64,
    pub tx_count: i64,
    pub power_score: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Database row for the creatures table. Rows are append-only; only the
/// mint columns are filled in later, once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    pub id: i64,
    pub trainer_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub role: String,
    pub rarity: String,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub wisdom: i32,
    pub luck: i32,
    pub flavor_text: String,
    pub image_url: String,
    pub on_chain_token_id: Option<String>,
    pub minted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A creature joined with the trainer fields the metadata document needs.
#[derive(Debug, Clone, FromRow)]
pub struct CreatureWithOwner {
    #[sqlx(flatten)]
    pub creature: Creature,
    pub owner_wallet_address: String,
    pub owner_resolved_name: Option<String>,
    pub owner_power_score: i64,
    pub owner_chain: String,
}

/// Trainer with full creature history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerProfile {
    #[serde(flatten)]
    pub trainer: Trainer,
    pub creatures: Vec<Creature>,
}

/// Fields written on every trainer upsert.
#[derive(Debug, Clone)]
pub struct TrainerUpsert {
    pub wallet_address: String,
    pub chain: String,
    pub resolved_name: Option<String>,
    pub native_balance_usd: f64,
    pub token_value_usd: f64,
    pub nft_count: i64,
    pub tx_count: i64,
    pub power_score: i64,
}

impl From<&WalletProfile> for TrainerUpsert {
    fn from(profile: &WalletProfile) -> Self {
        Self {
            wallet_address: profile.wallet_address.to_lowercase(),
            chain: profile.chain.clone(),
            resolved_name: profile.resolved_name.clone(),
            native_balance_usd: profile.native_balance_usd,
            token_value_usd: profile.token_value_usd,
            nft_count: i64::try_from(profile.nft_count).unwrap_or(i64::MAX),
            tx_count: i64::try_from(profile.tx_count).unwrap_or(i64::MAX),
            power_score: profile.power_score,
        }
    }
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// Trainer joined with its most recent creature (if any).
#[derive(Debug, Clone, FromRow)]
pub struct LeaderboardRow {
    pub id: Uuid,
    pub wallet_address: String,
    pub resolved_name: Option<String>,
    pub power_score: i64,
    pub nft_count: i64,
    pub tx_count: i64,
    pub chain: String,
    pub creature_name: Option<String>,
    pub creature_rarity: Option<String>,
    pub creature_type: Option<String>,
    pub creature_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureSummary {
    pub name: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub wallet_address: String,
    pub resolved_name: Option<String>,
    pub power_score: i64,
    pub nft_count: i64,
    pub tx_count: i64,
    pub chain: String,
    pub latest_creature: Option<CreatureSummary>,
}

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(row: LeaderboardRow) -> Self {
        let latest_creature = match (row.creature_name, row.creature_rarity) {
            (Some(name), Some(rarity)) => Some(CreatureSummary {
                name,
                rarity,
                creature_type: row.creature_type.unwrap_or_default(),
                image_url: row.creature_image_url.unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            id: row.id,
            wallet_address: row.wallet_address,
            resolved_name: row.resolved_name,
            power_score: row.power_score,
            nft_count: row.nft_count,
            tx_count: row.tx_count,
            chain: row.chain,
            latest_creature,
        }
    }
}
