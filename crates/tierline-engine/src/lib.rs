//! # Tierline Engine
//!
//! Credit scoring and loan eligibility for wallet addresses.
//!
//! The engine combines self-reported questionnaire answers with on-chain
//! activity fetched from Stellar Horizon into a bounded score (300-850),
//! classifies the score into a risk tier, adjusts it as payment outcomes
//! are reported, and resolves requested loan amounts against
//! lender-declared risk profiles.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      CreditService                         │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐   │
//! │  │ Register │  │ Scoring  │  │ Payment  │  │  Lender  │   │
//! │  │  /Login  │  │ Request  │  │  Report  │  │ Profiles │   │
//! │  └────┬─────┘  └────┬─────┘  └────┬─────┘  └────┬─────┘   │
//! │       │             │             │             │         │
//! │  ┌────┴─────────────┴─────────────┴─────────────┴─────┐   │
//! │  │      domain: scoring · eligibility · payment       │   │
//! │  └────┬──────────────────────────────────────────┬────┘   │
//! │  ┌────┴──────────────┐          ┌────────────────┴────┐   │
//! │  │  ActivityProvider │          │     RecordStore     │   │
//! │  │ (Horizon, fixture)│          │  (DashMap-backed)   │   │
//! │  └───────────────────┘          └─────────────────────┘   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scoring itself is synchronous pure computation; only the activity
//! provider and the record store perform I/O.

pub mod config;
pub mod domain;
pub mod infra;
pub mod service;

// Re-export core functions and types
pub use domain::eligibility::{evaluate_eligibility, EligibilityDecision};
pub use domain::payment::{adjust_score, ScoreAdjustment};
pub use domain::scoring::{
    activity_only_score, activity_score, blended_score, questionnaire_score, ActivityWeights,
    ScoringMode,
};

// Re-export infrastructure
pub use infra::activity::{ActivityProvider, FixtureProvider, HorizonProvider, ProviderError};
pub use infra::record_store::{InMemoryStore, RecordStore, StoreError, StoreStats};

// Re-export orchestration
pub use service::{CreditService, PaymentReceipt, ProfileView, Registration, ScoringDecision};

/// Default Stellar Horizon endpoint
pub const DEFAULT_HORIZON_URL: &str = "https://horizon.stellar.org";

/// Default budget for one wallet-activity fetch, in milliseconds
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Default page size for transaction and operation history
pub const DEFAULT_HISTORY_PAGE_LIMIT: u32 = 200;

/// Questionnaire weight in blended mode
pub const BLEND_QUESTIONNAIRE_WEIGHT: f64 = 0.4;

/// Wallet-activity weight in blended mode
pub const BLEND_ACTIVITY_WEIGHT: f64 = 0.6;

/// Name given to a lender created without one
pub const DEFAULT_LENDER_NAME: &str = "Lender";
