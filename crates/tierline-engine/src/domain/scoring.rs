//! Score calculation
//!
//! Three selectable strategies: questionnaire-only, wallet-activity-only,
//! and a 40/60 blend of the two. The questionnaire and blended modes are
//! bounded to [300, 850]; the activity mode is bounded by the sum of its
//! per-factor caps.

use serde::{Deserialize, Serialize};

use tierline_common::{
    QuestionnaireAnswers, ScoringBreakdown, ScoringError, WalletActivity, SCORE_MAX, SCORE_MIN,
};

use crate::{BLEND_ACTIVITY_WEIGHT, BLEND_QUESTIONNAIRE_WEIGHT};

/// Which scoring strategy applies to a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// Self-reported answers only
    Questionnaire,

    /// On-chain activity only; fails when the address is unresolvable
    Activity,

    /// 40% questionnaire, 60% activity, with questionnaire fallback
    #[default]
    Blended,
}

/// Per-factor rates and caps for the activity score.
///
/// The caps are data rather than inline literals so that the blended
/// rescaling divisor stays a derived value: [`ActivityWeights::max_total`]
/// is always the sum of the caps, and changing a cap cannot silently skew
/// the blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityWeights {
    /// Points per year of wallet age
    pub age_per_year: f64,
    pub age_cap: f64,

    /// Points per sampled transaction
    pub tx_rate: f64,
    pub tx_cap: f64,

    /// Points at a 100% success rate
    pub success_cap: f64,

    /// Points per decade of balance (log10)
    pub balance_rate: f64,
    pub balance_cap: f64,

    /// Points per trustline
    pub trustline_rate: f64,
    pub trustline_cap: f64,

    /// Points per sampled operation
    pub ops_rate: f64,
    pub ops_cap: f64,
}

impl ActivityWeights {
    /// Weights for standalone activity scoring; raw ceiling 350.
    pub const CAPPED: Self = Self {
        age_per_year: 40.0,
        age_cap: 80.0,
        tx_rate: 0.4,
        tx_cap: 70.0,
        success_cap: 50.0,
        balance_rate: 15.0,
        balance_cap: 60.0,
        trustline_rate: 10.0,
        trustline_cap: 50.0,
        ops_rate: 0.25,
        ops_cap: 40.0,
    };

    /// Weights for the activity component of the blend; raw ceiling 380.
    pub const BLENDED: Self = Self {
        age_per_year: 50.0,
        age_cap: 100.0,
        tx_rate: 0.5,
        tx_cap: 80.0,
        success_cap: 50.0,
        balance_rate: 20.0,
        balance_cap: 70.0,
        trustline_rate: 10.0,
        trustline_cap: 50.0,
        ops_rate: 0.2,
        ops_cap: 30.0,
    };

    /// Highest raw score these weights can produce: the sum of the caps.
    pub fn max_total(&self) -> f64 {
        self.age_cap
            + self.tx_cap
            + self.success_cap
            + self.balance_cap
            + self.trustline_cap
            + self.ops_cap
    }
}

/// Score a questionnaire alone. Total: always lands in [300, 850].
pub fn questionnaire_score(answers: &QuestionnaireAnswers) -> u16 {
    let normalized = answers.wallet_age_months.max(0.0) * 0.2
        + answers.average_balance.max(0.0) * 0.0001
        + answers.transaction_count.max(0.0) * 0.1
        + answers.defi_interactions.max(0.0) * 5.0
        + answers.monthly_income.max(0.0) * 0.0005;

    clamp_score(f64::from(SCORE_MIN) + normalized)
}

/// Raw activity points under the given weights. Invalid activity scores 0.
pub fn activity_score(activity: &WalletActivity, weights: &ActivityWeights) -> u16 {
    if !activity.is_valid {
        return 0;
    }

    let age = (f64::from(activity.wallet_age_days) / 365.0 * weights.age_per_year)
        .min(weights.age_cap);
    let tx = (f64::from(activity.total_transactions) * weights.tx_rate).min(weights.tx_cap);
    let success = activity.success_rate() * weights.success_cap;
    let balance =
        ((activity.average_balance + 1.0).log10() * weights.balance_rate).min(weights.balance_cap);
    let trustlines =
        (f64::from(activity.trustline_count) * weights.trustline_rate).min(weights.trustline_cap);
    let ops = (f64::from(activity.operations_count) * weights.ops_rate).min(weights.ops_cap);

    (age + tx + success + balance + trustlines + ops).round() as u16
}

/// Standalone activity score with the [`ActivityWeights::CAPPED`] table.
///
/// The address must have resolved on the ledger: unresolved activity is a
/// domain error here, never a zero score, and callers must not create a
/// record for it.
pub fn activity_only_score(
    address: &str,
    activity: &WalletActivity,
) -> Result<u16, ScoringError> {
    if !activity.is_valid {
        return Err(ScoringError::WalletUnresolved(address.to_string()));
    }
    Ok(activity_score(activity, &ActivityWeights::CAPPED))
}

/// Blend questionnaire and activity 40/60.
///
/// The questionnaire score is projected onto the activity-point scale so
/// the weighted sum lives in [0, max_total] before being rescaled onto
/// [300, 850]. Unavailable activity degrades to the questionnaire score
/// with zero wallet contribution; this path cannot fail.
pub fn blended_score(
    answers: &QuestionnaireAnswers,
    activity: &WalletActivity,
) -> ScoringBreakdown {
    let q_score = questionnaire_score(answers);

    if !activity.is_valid {
        return ScoringBreakdown {
            questionnaire_score: q_score,
            stellar_score: 0,
            final_score: q_score,
        };
    }

    let weights = ActivityWeights::BLENDED;
    let max_total = weights.max_total();
    let span = f64::from(SCORE_MAX - SCORE_MIN);

    let s_score = activity_score(activity, &weights);
    let q_scaled = f64::from(q_score - SCORE_MIN) / span * max_total;
    let combined =
        BLEND_QUESTIONNAIRE_WEIGHT * q_scaled + BLEND_ACTIVITY_WEIGHT * f64::from(s_score);
    let final_score = clamp_score(f64::from(SCORE_MIN) + combined / max_total * span);

    ScoringBreakdown {
        questionnaire_score: q_score,
        stellar_score: s_score,
        final_score,
    }
}

fn clamp_score(raw: f64) -> u16 {
    raw.round()
        .clamp(f64::from(SCORE_MIN), f64::from(SCORE_MAX)) as u16
}
