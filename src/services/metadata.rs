use serde::{Deserialize, Serialize};

use crate::models::CreatureWithOwner;

/// ERC-721 metadata document. Field names are consumed by marketplaces
/// and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub external_url: String,
    pub attributes: Vec<NftAttribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: TraitValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Number(i64),
    Text(String),
}

impl NftAttribute {
    fn text(trait_type: &str, value: &str) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: TraitValue::Text(value.into()),
            display_type: None,
        }
    }

    fn number(trait_type: &str, value: i64) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: TraitValue::Number(value),
            display_type: Some("number".into()),
        }
    }
}

/// `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

pub fn build_metadata(record: &CreatureWithOwner, public_base_url: &str) -> NftMetadata {
    let c = &record.creature;
    let trainer_name = record
        .owner_resolved_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| short_address(&record.owner_wallet_address));

    NftMetadata {
        name: format!("Trainer: {trainer_name}"),
        description: format!(
            "{} {}-type {}: {}. {}",
            c.rarity, c.creature_type, c.role, c.name, c.flavor_text
        ),
        image: c.image_url.clone(),
        external_url: format!(
            "{}/profile/{}",
            public_base_url.trim_end_matches('/'),
            record.owner_wallet_address
        ),
        attributes: vec![
            NftAttribute::text("Rarity", &c.rarity),
            NftAttribute::text("Type", &c.creature_type),
            NftAttribute::text("Role", &c.role),
            NftAttribute::number("Attack", c.attack.into()),
            NftAttribute::number("Defense", c.defense.into()),
            NftAttribute::number("Speed", c.speed.into()),
            NftAttribute::number("Wisdom", c.wisdom.into()),
            NftAttribute::number("Luck", c.luck.into()),
            NftAttribute::number("Power Score", record.owner_power_score),
            NftAttribute::text("Chain", &record.owner_chain),
        ],
    }
}
