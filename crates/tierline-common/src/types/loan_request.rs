//! Persisted scoring-request records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tier::Tier;

/// Terminal status of an evaluation. Rejection is a valid outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Approved,
    Rejected,
}

/// One scoring evaluation, immutable once created. Re-evaluation produces
/// a new record, never an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub id: Uuid,

    pub wallet_address: String,

    pub lender_id: Uuid,

    pub requested_amount: Decimal,

    /// Tier the resolver assigned
    pub profile_assigned: Tier,

    /// Ceiling of the assigned tier at evaluation time
    pub max_amount: Decimal,

    pub status: RequestStatus,

    pub created_at: DateTime<Utc>,
}

impl LoanRequest {
    pub fn new(
        wallet_address: impl Into<String>,
        lender_id: Uuid,
        requested_amount: Decimal,
        profile_assigned: Tier,
        max_amount: Decimal,
        status: RequestStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            wallet_address: wallet_address.into(),
            lender_id,
            requested_amount,
            profile_assigned,
            max_amount,
            status,
            created_at: Utc::now(),
        }
    }
}
