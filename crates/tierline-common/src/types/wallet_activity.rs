//! On-chain wallet activity metrics
//!
//! Constructed fresh from the ledger for every scoring call; persisted
//! only as an audit snapshot next to the profile it scored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activity metrics for one wallet address.
///
/// When `is_valid` is false the remaining fields are unreliable and must
/// not contribute positively to any score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletActivity {
    /// Days since the first recorded transaction
    pub wallet_age_days: u32,

    /// Transactions in the sampled history window
    pub total_transactions: u32,

    /// Successful transactions in the same window
    pub successful_transactions: u32,

    /// Native-asset balance
    pub average_balance: f64,

    /// Non-native asset lines held by the account
    pub trustline_count: u32,

    /// Operations in the sampled history window
    pub operations_count: u32,

    /// Timestamp of the first recorded transaction
    pub first_activity: Option<DateTime<Utc>>,

    /// Whether the address resolved on the ledger
    pub is_valid: bool,
}

impl WalletActivity {
    /// The all-zero value for an address that could not be resolved.
    pub fn unavailable() -> Self {
        Self {
            wallet_age_days: 0,
            total_transactions: 0,
            successful_transactions: 0,
            average_balance: 0.0,
            trustline_count: 0,
            operations_count: 0,
            first_activity: None,
            is_valid: false,
        }
    }

    /// Fraction of sampled transactions that succeeded; 0 when none were
    /// sampled.
    pub fn success_rate(&self) -> f64 {
        if self.total_transactions == 0 {
            0.0
        } else {
            f64::from(self.successful_transactions) / f64::from(self.total_transactions)
        }
    }
}
