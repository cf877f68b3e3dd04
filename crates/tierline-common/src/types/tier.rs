//! Risk tier classification
//!
//! A score in [300, 850] maps to exactly one of three ordinal tiers. The
//! tier is always derived from the score, never stored independently of it.

use serde::{Deserialize, Serialize};

use crate::{TIER_A_MIN, TIER_B_MIN};

/// Ordinal risk tier. Declaration order gives the derived ordering C < B < A.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    C,
    B,
    A,
}

impl Tier {
    /// Classify a score: >= 750 is A, >= 650 is B, everything below is C.
    pub fn for_score(score: u16) -> Self {
        if score >= TIER_A_MIN {
            Tier::A
        } else if score >= TIER_B_MIN {
            Tier::B
        } else {
            Tier::C
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
        };
        write!(f, "{label}")
    }
}
