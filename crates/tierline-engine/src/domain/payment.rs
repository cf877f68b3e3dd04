//! Payment-driven score adjustment

use tierline_common::{PaymentOutcome, Tier, SCORE_MAX, SCORE_MIN};

/// Score and tier after one payment outcome, returned together so a
/// caller cannot persist one without the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreAdjustment {
    pub score: u16,
    pub profile_tier: Tier,
}

/// Apply a reported outcome to a score: paid +10, defaulted -30, clamped
/// to [300, 850], tier re-derived.
pub fn adjust_score(current: u16, outcome: PaymentOutcome) -> ScoreAdjustment {
    let adjusted = (i32::from(current) + outcome.delta())
        .clamp(i32::from(SCORE_MIN), i32::from(SCORE_MAX)) as u16;

    ScoreAdjustment {
        score: adjusted,
        profile_tier: Tier::for_score(adjusted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_paid_raises_score() {
        let adjustment = adjust_score(650, PaymentOutcome::Paid);
        assert_eq!(adjustment.score, 660);
        assert_eq!(adjustment.profile_tier, Tier::B);
    }

    #[test]
    fn test_default_lowers_score_and_tier() {
        let adjustment = adjust_score(660, PaymentOutcome::Defaulted);
        assert_eq!(adjustment.score, 630);
        assert_eq!(adjustment.profile_tier, Tier::C);
    }

    #[test]
    fn test_clamping_at_bounds() {
        assert_eq!(adjust_score(845, PaymentOutcome::Paid).score, 850);
        assert_eq!(adjust_score(850, PaymentOutcome::Paid).score, 850);
        assert_eq!(adjust_score(305, PaymentOutcome::Defaulted).score, 300);
        assert_eq!(adjust_score(300, PaymentOutcome::Defaulted).score, 300);
    }

    proptest! {
        #[test]
        fn prop_adjusted_score_stays_in_range(score in 300u16..=850) {
            for outcome in [PaymentOutcome::Paid, PaymentOutcome::Defaulted] {
                let adjustment = adjust_score(score, outcome);
                prop_assert!((300..=850).contains(&adjustment.score));
                prop_assert_eq!(adjustment.profile_tier, Tier::for_score(adjustment.score));
            }
        }
    }
}
