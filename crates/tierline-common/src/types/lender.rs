//! Lender identity and risk profiles

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tier::Tier;

/// One lender-declared (tier, minScore, maxAmount, rate) row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub tier: Tier,

    /// Minimum qualifying score, in [300, 850]
    pub min_score: u16,

    /// Loan ceiling for this tier, > 0
    pub max_amount: Decimal,

    /// Interest rate in percent, 0-100
    pub interest_rate: f64,
}

/// A third-party lender, keyed by API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lender {
    pub id: Uuid,

    pub name: String,

    pub api_key: String,

    /// Ordered risk profiles; replaced wholesale on redefinition
    pub profiles: Vec<RiskProfile>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Lender {
    pub fn new(
        api_key: impl Into<String>,
        name: impl Into<String>,
        profiles: Vec<RiskProfile>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            api_key: api_key.into(),
            profiles,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hand the lender a new profile list, dropping the previous one.
    pub fn replace_profiles(&mut self, profiles: Vec<RiskProfile>) {
        self.profiles = profiles;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile(tier: Tier, min_score: u16, max_amount: Decimal) -> RiskProfile {
        RiskProfile {
            tier,
            min_score,
            max_amount,
            interest_rate: 10.0,
        }
    }

    #[test]
    fn test_replace_profiles_is_wholesale() {
        let mut lender = Lender::new(
            "key-1",
            "Test Lender",
            vec![
                profile(Tier::A, 700, dec!(10000)),
                profile(Tier::B, 600, dec!(5000)),
            ],
        );

        lender.replace_profiles(vec![profile(Tier::C, 300, dec!(1000))]);

        assert_eq!(lender.profiles.len(), 1);
        assert_eq!(lender.profiles[0].tier, Tier::C);
    }
}
