//! # Tierline Common
//!
//! Shared data contracts and errors for the Tierline credit engine.
//!
//! ## Core Types
//!
//! - [`Tier`]: ordinal risk classification, C < B < A
//! - [`CreditProfile`]: per-address score, tier, and audit snapshot
//! - [`WalletActivity`]: on-chain metrics derived from the ledger
//! - [`QuestionnaireAnswers`]: self-reported registration data
//! - [`Lender`]/[`RiskProfile`]: lender-declared tier ceilings
//! - [`LoanRequest`]/[`PaymentEvent`]: persisted evaluation records

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{LookupError, Result, ScoringError, TierlineError};
pub use types::{
    credit_profile::{CreditProfile, ScoringBreakdown},
    lender::{Lender, RiskProfile},
    loan_request::{LoanRequest, RequestStatus},
    payment::{PaymentEvent, PaymentOutcome, PaymentReport},
    questionnaire::QuestionnaireAnswers,
    tier::Tier,
    wallet_activity::WalletActivity,
};

/// Lowest assignable credit score
pub const SCORE_MIN: u16 = 300;

/// Highest assignable credit score
pub const SCORE_MAX: u16 = 850;

/// Minimum score classified as tier A
pub const TIER_A_MIN: u16 = 750;

/// Minimum score classified as tier B
pub const TIER_B_MIN: u16 = 650;

/// Score delta applied for a reported on-time payment
pub const PAID_DELTA: i32 = 10;

/// Score delta applied for a reported default
pub const DEFAULTED_DELTA: i32 = -30;
