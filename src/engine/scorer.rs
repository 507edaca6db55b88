use serde::{Deserialize, Serialize};

/// Raw chain telemetry the power score is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub tx_count: u64,
    pub nft_count: u64,
    pub token_value_usd: f64,
    pub native_balance_usd: f64,
}

/// Composite wallet activity score.
///
/// `floor(2*tx + 50*nft + 100*log10(tokenUSD + 1) + 50*log10(nativeUSD + 1))`
///
/// Counts are linear; dollar values are log-compressed. The `+1` floors each
/// log term at zero for empty wallets. Negative or NaN dollar amounts count
/// as zero so the result is never negative.
pub fn power_score(inputs: &ScoreInputs) -> i64 {
    let tx_weight = inputs.tx_count as f64 * 2.0;
    let nft_weight = inputs.nft_count as f64 * 50.0;
    let token_weight = log_value(inputs.token_value_usd) * 100.0;
    let native_weight = log_value(inputs.native_balance_usd) * 50.0;

    (tx_weight + nft_weight + token_weight + native_weight).floor() as i64
}

fn log_value(usd: f64) -> f64 {
    (usd.max(0.0) + 1.0).log10()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(tx: u64, nft: u64, token: f64, native: f64) -> ScoreInputs {
        ScoreInputs {
            tx_count: tx,
            nft_count: nft,
            token_value_usd: token,
            native_balance_usd: native,
        }
    }

    #[test]
    fn test_counts_only() {
        assert_eq!(power_score(&inputs(100, 2, 0.0, 0.0)), 300);
    }

    #[test]
    fn test_empty_wallet_scores_zero() {
        assert_eq!(power_score(&inputs(0, 0, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_dollar_values_are_log_compressed() {
        let small = power_score(&inputs(0, 0, 1_099.0, 149.0));
        let whale = power_score(&inputs(0, 0, 1_099_999.0, 149.0));
        assert_eq!(small, 412);
        // A 1000x larger token bag adds only 300 points
        assert_eq!(whale - small, 300);
    }

    #[test]
    fn test_result_is_floored() {
        // 2 + log10(11) * 100 ≈ 104.14 + log10(2) * 50 ≈ 15.05
        assert_eq!(power_score(&inputs(1, 0, 10.0, 1.0)), 121);
    }

    #[test]
    fn test_negative_and_nan_values_count_as_zero() {
        assert_eq!(power_score(&inputs(0, 0, -50.0, f64::NAN)), 0);
    }
}
