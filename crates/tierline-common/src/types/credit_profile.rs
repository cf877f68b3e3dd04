//! Persisted credit profile
//!
//! One profile per wallet address, created on first registration and never
//! deleted. The tier is always the classifier's output for the current
//! score; mutation goes through [`CreditProfile::apply_score`] so the two
//! cannot drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::questionnaire::QuestionnaireAnswers;
use super::tier::Tier;
use super::wallet_activity::WalletActivity;

/// Audit breakdown of a blended score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringBreakdown {
    /// Questionnaire-only component, already on the 300-850 scale
    pub questionnaire_score: u16,

    /// Raw wallet-activity points; 0 when activity was unavailable
    pub stellar_score: u16,

    /// Final bounded score
    pub final_score: u16,
}

/// Durable creditworthiness record for one wallet address.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditProfile {
    /// Wallet address, the unique key
    pub wallet_address: String,

    /// Current score in [300, 850]
    pub score: u16,

    /// Tier derived from the current score
    pub profile_tier: Tier,

    /// Questionnaire submitted at registration
    pub questionnaire: QuestionnaireAnswers,

    /// Activity snapshot taken when the initial score was computed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_snapshot: Option<WalletActivity>,

    /// Breakdown of the initial score, present for blended registrations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_breakdown: Option<ScoringBreakdown>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl CreditProfile {
    /// Create a profile for a freshly scored address.
    pub fn new(
        wallet_address: impl Into<String>,
        score: u16,
        questionnaire: QuestionnaireAnswers,
        activity_snapshot: Option<WalletActivity>,
        scoring_breakdown: Option<ScoringBreakdown>,
    ) -> Self {
        let now = Utc::now();
        Self {
            wallet_address: wallet_address.into(),
            score,
            profile_tier: Tier::for_score(score),
            questionnaire,
            activity_snapshot,
            scoring_breakdown,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the score, re-deriving the tier and refreshing the update
    /// timestamp.
    pub fn apply_score(&mut self, score: u16) {
        self.score = score;
        self.profile_tier = Tier::for_score(score);
        self.updated_at = Utc::now();
    }
}
