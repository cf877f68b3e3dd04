//! Loan eligibility resolution

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tierline_common::{RiskProfile, Tier};

/// Outcome of matching a score and requested amount against a lender's
/// risk profiles. Rejection is a valid terminal result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDecision {
    pub eligible: bool,

    /// Tier of the selected profile, C when none qualified
    pub profile_assigned: Tier,

    /// Ceiling of the selected profile, zero when none qualified
    pub max_amount: Decimal,
}

/// Select the best-matching profile for a score and decide whether the
/// requested amount fits.
///
/// Profiles are stable-sorted descending by minimum score, so the first
/// qualifying profile is the highest bar the applicant clears, with ties
/// broken by declaration order. An applicant below every minimum is
/// assigned tier C with a zero ceiling and is never eligible. The tier
/// and ceiling are reported whatever the outcome.
pub fn evaluate_eligibility(
    score: u16,
    profiles: &[RiskProfile],
    requested_amount: Decimal,
) -> EligibilityDecision {
    let mut ranked: Vec<&RiskProfile> = profiles.iter().collect();
    ranked.sort_by(|a, b| b.min_score.cmp(&a.min_score));

    for profile in ranked {
        if score >= profile.min_score {
            return EligibilityDecision {
                eligible: requested_amount <= profile.max_amount,
                profile_assigned: profile.tier,
                max_amount: profile.max_amount,
            };
        }
    }

    EligibilityDecision {
        eligible: false,
        profile_assigned: Tier::C,
        max_amount: Decimal::ZERO,
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

    fn standard_profiles() -> Vec<RiskProfile> {
        vec![
            profile(Tier::A, 700, dec!(10000)),
            profile(Tier::B, 600, dec!(5000)),
            profile(Tier::C, 300, dec!(1000)),
        ]
    }

    #[test]
    fn test_selects_highest_qualifying_tier() {
        let decision = evaluate_eligibility(650, &standard_profiles(), dec!(4000));
        assert_eq!(decision.profile_assigned, Tier::B);
        assert_eq!(decision.max_amount, dec!(5000));
        assert!(decision.eligible);
    }

    #[test]
    fn test_rejects_amount_over_ceiling() {
        let decision = evaluate_eligibility(650, &standard_profiles(), dec!(6000));
        assert_eq!(decision.profile_assigned, Tier::B);
        assert_eq!(decision.max_amount, dec!(5000));
        assert!(!decision.eligible);
    }

    #[test]
    fn test_below_every_minimum_is_never_eligible() {
        let decision = evaluate_eligibility(250, &standard_profiles(), dec!(1));
        assert_eq!(decision.profile_assigned, Tier::C);
        assert_eq!(decision.max_amount, Decimal::ZERO);
        assert!(!decision.eligible);
    }

    #[test]
    fn test_declaration_order_unaffected_by_sort() {
        // Same list declared low-to-high must resolve identically.
        let mut reversed = standard_profiles();
        reversed.reverse();
        let decision = evaluate_eligibility(720, &reversed, dec!(8000));
        assert_eq!(decision.profile_assigned, Tier::A);
        assert_eq!(decision.max_amount, dec!(10000));
        assert!(decision.eligible);
    }

    #[test]
    fn test_equal_minimums_break_ties_by_declaration_order() {
        let profiles = vec![
            profile(Tier::B, 600, dec!(5000)),
            profile(Tier::A, 600, dec!(9000)),
        ];
        let decision = evaluate_eligibility(700, &profiles, dec!(100));
        assert_eq!(decision.profile_assigned, Tier::B);
    }

    #[test]
    fn test_empty_profile_list() {
        let decision = evaluate_eligibility(850, &[], dec!(100));
        assert_eq!(decision.profile_assigned, Tier::C);
        assert!(!decision.eligible);
    }

    #[test]
    fn test_boundary_amount_is_eligible() {
        let decision = evaluate_eligibility(650, &standard_profiles(), dec!(5000));
        assert!(decision.eligible);
    }
}
