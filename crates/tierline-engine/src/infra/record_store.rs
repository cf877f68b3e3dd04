//! Record storage
//!
//! Durable keyed storage for credit profiles, lenders, loan requests, and
//! payment events.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use tierline_common::{CreditProfile, Lender, LoanRequest, PaymentEvent, RiskProfile, Tier};

use crate::DEFAULT_LENDER_NAME;

/// Trait for record storage backends
///
/// `update_profile_score` must land score and tier together or not at all.
/// A backend without per-record atomic updates (for example a SQL store)
/// must wrap a payment append plus score update in one transaction to keep
/// score and tier from drifting.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a credit profile by wallet address.
    async fn find_profile_by_address(&self, address: &str) -> Option<CreditProfile>;

    /// Persist a new credit profile. The address must be unseen.
    async fn create_profile(&self, profile: CreditProfile) -> Result<CreditProfile, StoreError>;

    /// Atomically replace a profile's score and tier.
    async fn update_profile_score(
        &self,
        address: &str,
        score: u16,
        tier: Tier,
    ) -> Result<CreditProfile, StoreError>;

    /// Look up a lender by API key.
    async fn find_lender_by_key(&self, api_key: &str) -> Option<Lender>;

    /// Look up a lender by id.
    async fn find_lender_by_id(&self, id: &Uuid) -> Option<Lender>;

    /// Replace a lender's whole profile list, creating the lender if the
    /// key is unseen. The name only applies at creation.
    async fn upsert_lender_profiles(
        &self,
        api_key: &str,
        name: Option<String>,
        profiles: Vec<RiskProfile>,
    ) -> Result<Lender, StoreError>;

    /// Append an immutable loan request record.
    async fn create_loan_request(&self, request: LoanRequest) -> Result<LoanRequest, StoreError>;

    /// Append a payment event.
    async fn create_payment_event(&self, event: PaymentEvent)
        -> Result<PaymentEvent, StoreError>;
}

/// Errors from record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Profile already exists: {0}")]
    ProfileExists(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<StoreError> for tierline_common::TierlineError {
    fn from(err: StoreError) -> Self {
        tierline_common::TierlineError::Storage(err.to_string())
    }
}

/// In-memory storage implementation
///
/// Uses DashMap for concurrent access; per-entry locking makes the
/// score+tier update a single atomic replacement.
#[derive(Default)]
pub struct InMemoryStore {
    profiles: DashMap<String, CreditProfile>,
    lenders: DashMap<Uuid, Lender>,
    lenders_by_key: DashMap<String, Uuid>,
    requests: DashMap<Uuid, LoanRequest>,
    payments: DashMap<Uuid, PaymentEvent>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record counts across all families.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            profiles: self.profiles.len(),
            lenders: self.lenders.len(),
            loan_requests: self.requests.len(),
            payment_events: self.payments.len(),
        }
    }
}

/// Statistics about the record store
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub profiles: usize,
    pub lenders: usize,
    pub loan_requests: usize,
    pub payment_events: usize,
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn find_profile_by_address(&self, address: &str) -> Option<CreditProfile> {
        self.profiles.get(address).map(|p| p.clone())
    }

    async fn create_profile(&self, profile: CreditProfile) -> Result<CreditProfile, StoreError> {
        match self.profiles.entry(profile.wallet_address.clone()) {
            Entry::Occupied(_) => Err(StoreError::ProfileExists(profile.wallet_address)),
            Entry::Vacant(slot) => {
                slot.insert(profile.clone());
                Ok(profile)
            }
        }
    }

    async fn update_profile_score(
        &self,
        address: &str,
        score: u16,
        tier: Tier,
    ) -> Result<CreditProfile, StoreError> {
        let mut entry = self
            .profiles
            .get_mut(address)
            .ok_or_else(|| StoreError::ProfileNotFound(address.to_string()))?;

        entry.score = score;
        entry.profile_tier = tier;
        entry.updated_at = Utc::now();

        Ok(entry.clone())
    }

    async fn find_lender_by_key(&self, api_key: &str) -> Option<Lender> {
        let id = self.lenders_by_key.get(api_key).map(|entry| *entry)?;
        self.lenders.get(&id).map(|l| l.clone())
    }

    async fn find_lender_by_id(&self, id: &Uuid) -> Option<Lender> {
        self.lenders.get(id).map(|l| l.clone())
    }

    async fn upsert_lender_profiles(
        &self,
        api_key: &str,
        name: Option<String>,
        profiles: Vec<RiskProfile>,
    ) -> Result<Lender, StoreError> {
        if let Some(id) = self.lenders_by_key.get(api_key).map(|entry| *entry) {
            let mut lender = self
                .lenders
                .get_mut(&id)
                .ok_or_else(|| StoreError::StorageError(format!("lender index out of sync: {id}")))?;
            lender.replace_profiles(profiles);
            return Ok(lender.clone());
        }

        let lender = Lender::new(
            api_key,
            name.unwrap_or_else(|| DEFAULT_LENDER_NAME.to_string()),
            profiles,
        );
        self.lenders_by_key.insert(api_key.to_string(), lender.id);
        self.lenders.insert(lender.id, lender.clone());
        Ok(lender)
    }

    async fn create_loan_request(&self, request: LoanRequest) -> Result<LoanRequest, StoreError> {
        self.requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn create_payment_event(
        &self,
        event: PaymentEvent,
    ) -> Result<PaymentEvent, StoreError> {
        self.payments.insert(event.id, event.clone());
        Ok(event)
    }
}
