pub mod gemini;

pub use gemini::GeminiClient;

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::catalog::type_entry;
use crate::engine::generator::{fallback_lore, fallback_name, short_flavor};
use crate::engine::CreatureDraft;
use crate::models::{Lore, WalletProfile};

#[derive(Debug, Error)]
pub enum LoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model returned no text")]
    EmptyResponse,
}

/// A text-generation backend: prompt in, free text out.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LoreError>> + Send;
}

/// Why deterministic lore was used instead of generated lore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    MissingCredential,
    Unavailable,
    Unparseable,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::MissingCredential => "missing_credential",
            FallbackReason::Unavailable => "unavailable",
            FallbackReason::Unparseable => "unparseable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoreOutcome {
    Generated(Lore),
    Fallback { lore: Lore, reason: FallbackReason },
}

impl LoreOutcome {
    pub fn into_lore(self) -> Lore {
        match self {
            LoreOutcome::Generated(lore) | LoreOutcome::Fallback { lore, .. } => lore,
        }
    }

    pub fn fallback_reason(&self) -> Option<FallbackReason> {
        match self {
            LoreOutcome::Generated(_) => None,
            LoreOutcome::Fallback { reason, .. } => Some(*reason),
        }
    }
}

/// Names creatures through an optional text generator.
///
/// Without a generator every creature gets deterministic lore and no call
/// is attempted.
#[derive(Debug, Clone)]
pub struct LoreWriter<G> {
    generator: Option<G>,
}

impl<G: TextGenerator> LoreWriter<G> {
    pub fn new(generator: Option<G>) -> Self {
        Self { generator }
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn write(&self, profile: &WalletProfile, draft: &CreatureDraft) -> LoreOutcome {
        let fallback = |reason| LoreOutcome::Fallback {
            lore: fallback_lore(draft.rarity, draft.kind, &profile.chain),
            reason,
        };

        let Some(generator) = &self.generator else {
            return fallback(FallbackReason::MissingCredential);
        };

        match generator.generate(&build_prompt(profile, draft)).await {
            Ok(text) => parse_lore(&text, profile, draft),
            Err(e) => {
                tracing::warn!(error = %e, "Lore generation failed");
                fallback(FallbackReason::Unavailable)
            }
        }
    }
}

pub fn build_prompt(profile: &WalletProfile, draft: &CreatureDraft) -> String {
    let stats = &draft.stats;
    format!(
        r#"You are a creative Web3 creature designer. Generate a unique creature for a wallet owner.

Wallet Stats:
- Chain: {chain}
- Transaction Count: {tx}
- NFT Collection Size: {nft}
- Portfolio Value: ${value:.2}
- Wallet Name: {name}

Assigned Type: {kind} ({description})
Rarity: {rarity}
Stats: Attack {attack}, Defense {defense}, Speed {speed}, Wisdom {wisdom}, Luck {luck}

Generate:
1. A unique 2-word fantasy creature name (like "Blazefang" or "Shadowclaw"). DO NOT use Pokemon names.
2. A 1-2 sentence Pokedex-style description that ties the creature to the wallet's on-chain behavior.

Return ONLY a JSON object with keys "name" and "flavorText"."#,
        chain = profile.chain,
        tx = profile.tx_count,
        nft = profile.nft_count,
        value = profile.portfolio_value_usd(),
        name = profile.resolved_name.as_deref().unwrap_or("Anonymous"),
        kind = draft.kind,
        description = type_entry(draft.kind).description,
        rarity = draft.rarity,
        attack = stats.attack,
        defense = stats.defense,
        speed = stats.speed,
        wisdom = stats.wisdom,
        luck = stats.luck,
    )
}

/// Span from the first `{` to the last `}`, if any.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoreReply {
    name: Option<String>,
    flavor_text: Option<String>,
}

/// Interpret model output. Missing fields are filled individually; output
/// without a parseable JSON object falls back entirely.
pub fn parse_lore(text: &str, profile: &WalletProfile, draft: &CreatureDraft) -> LoreOutcome {
    let reply = extract_json_object(text).and_then(|json| serde_json::from_str::<LoreReply>(json).ok());

    let Some(reply) = reply else {
        tracing::warn!("Lore response contained no parseable JSON object");
        return LoreOutcome::Fallback {
            lore: fallback_lore(draft.rarity, draft.kind, &profile.chain),
            reason: FallbackReason::Unparseable,
        };
    };

    let non_empty = |s: Option<String>| s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    LoreOutcome::Generated(Lore {
        name: non_empty(reply.name).unwrap_or_else(|| fallback_name(draft.rarity, draft.kind)),
        flavor_text: non_empty(reply.flavor_text)
            .unwrap_or_else(|| short_flavor(draft.rarity, draft.kind)),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatureStats, CreatureType, Rarity, Role};

    struct Canned(Result<&'static str, ()>);

    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String, LoreError> {
            self.0.map(str::to_string).map_err(|_| LoreError::EmptyResponse)
        }
    }

    fn profile() -> WalletProfile {
        WalletProfile {
            wallet_address: "0xabc".into(),
            chain: "base".into(),
            resolved_name: None,
            native_balance: "1.0".into(),
            native_balance_usd: 3000.0,
            token_value_usd: 20.5,
            nft_count: 3,
            tx_count: 42,
            erc20_balances: vec![],
            power_score: 500,
            last_active_timestamp: 0,
        }
    }

    fn draft() -> CreatureDraft {
        CreatureDraft {
            kind: CreatureType::Fire,
            rarity: Rarity::Epic,
            stats: CreatureStats {
                attack: 85,
                defense: 40,
                speed: 60,
                wisdom: 30,
                luck: 50,
            },
            role: Role::Attacker,
        }
    }

    #[tokio::test]
    async fn test_missing_credential_uses_fallback() {
        let writer: LoreWriter<Canned> = LoreWriter::new(None);
        let outcome = writer.write(&profile(), &draft()).await;

        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::MissingCredential));
        let lore = outcome.into_lore();
        assert_eq!(lore.name, "Epic Firemon");
        assert_eq!(lore.flavor_text, "A epic fire-type creature from the base realm.");
    }

    #[tokio::test]
    async fn test_generator_error_uses_fallback() {
        let writer = LoreWriter::new(Some(Canned(Err(()))));
        let outcome = writer.write(&profile(), &draft()).await;
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::Unavailable));
        assert_eq!(outcome.into_lore().name, "Epic Firemon");
    }

    #[tokio::test]
    async fn test_generated_json_inside_prose() {
        let writer = LoreWriter::new(Some(Canned(Ok(
            "Sure! ```json\n{\"name\": \"Blaze Warden\", \"flavorText\": \"Burns gas.\"}\n```",
        ))));
        let outcome = writer.write(&profile(), &draft()).await;
        assert_eq!(
            outcome,
            LoreOutcome::Generated(Lore {
                name: "Blaze Warden".into(),
                flavor_text: "Burns gas.".into(),
            })
        );
    }

    #[test]
    fn test_unparseable_output_falls_back() {
        let outcome = parse_lore("I cannot do that.", &profile(), &draft());
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::Unparseable));

        let outcome = parse_lore("{name: broken", &profile(), &draft());
        assert_eq!(outcome.fallback_reason(), Some(FallbackReason::Unparseable));
    }

    #[test]
    fn test_missing_fields_filled_individually() {
        let outcome = parse_lore(r#"{"name": "Ember Fang"}"#, &profile(), &draft());
        let lore = outcome.into_lore();
        assert_eq!(lore.name, "Ember Fang");
        assert_eq!(lore.flavor_text, "A epic fire-type creature.");

        let outcome = parse_lore(r#"{"name": "", "flavorText": "Quiet."}"#, &profile(), &draft());
        assert_eq!(outcome.into_lore().name, "Epic Firemon");
    }

    #[test]
    fn test_extract_json_object() {
        assert_eq!(extract_json_object("x {\"a\":1} y"), Some("{\"a\":1}"));
        assert_eq!(extract_json_object("no braces"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_prompt_carries_context() {
        let prompt = build_prompt(&profile(), &draft());
        assert!(prompt.contains("- Chain: base"));
        assert!(prompt.contains("- Portfolio Value: $3020.50"));
        assert!(prompt.contains("- Wallet Name: Anonymous"));
        assert!(prompt.contains("Assigned Type: Fire (Bold, aggressive, high attack - for active traders)"));
        assert!(prompt.contains("Stats: Attack 85, Defense 40, Speed 60, Wisdom 30, Luck 50"));
    }
}
