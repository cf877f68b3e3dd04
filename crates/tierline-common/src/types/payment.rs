//! Reported payment outcomes
//!
//! Payment events are append-only; each one triggers exactly one score
//! mutation on its credit profile.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a reported payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    Paid,
    Defaulted,
}

impl PaymentOutcome {
    /// Signed score delta this outcome applies.
    pub fn delta(self) -> i32 {
        match self {
            PaymentOutcome::Paid => crate::PAID_DELTA,
            PaymentOutcome::Defaulted => crate::DEFAULTED_DELTA,
        }
    }
}

/// Lender-submitted payment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReport {
    pub api_key: String,

    pub wallet_address: String,

    pub amount: Decimal,

    #[serde(rename = "status")]
    pub outcome: PaymentOutcome,

    pub payment_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

/// Append-only record of one reported payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
    pub id: Uuid,

    pub wallet_address: String,

    pub lender_id: Uuid,

    pub amount: Decimal,

    #[serde(rename = "status")]
    pub outcome: PaymentOutcome,

    /// When the payment happened, per the lender
    pub payment_date: DateTime<Utc>,

    /// When this event was recorded
    pub recorded_at: DateTime<Utc>,

    /// Loan request this payment settles, when the lender knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}

impl PaymentEvent {
    pub fn new(
        wallet_address: impl Into<String>,
        lender_id: Uuid,
        amount: Decimal,
        outcome: PaymentOutcome,
        payment_date: DateTime<Utc>,
        request_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            wallet_address: wallet_address.into(),
            lender_id,
            amount,
            outcome,
            payment_date,
            recorded_at: Utc::now(),
            request_id,
        }
    }
}
