//! Orchestration layer
//!
//! Thin flows over the pure domain functions: registration, lookup,
//! lender profile definition, scoring requests, and payment reporting.
//! All ledger and store I/O happens here; the domain stays pure.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::time::timeout;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use tierline_common::{
    CreditProfile, Lender, LoanRequest, LookupError, PaymentEvent, PaymentReport,
    QuestionnaireAnswers, RequestStatus, Result, RiskProfile, ScoringBreakdown, Tier,
    TierlineError, WalletActivity,
};

use crate::config::EngineConfig;
use crate::domain::eligibility::evaluate_eligibility;
use crate::domain::payment::adjust_score;
use crate::domain::scoring::{
    activity_only_score, blended_score, questionnaire_score, ScoringMode,
};
use crate::infra::activity::ActivityProvider;
use crate::infra::record_store::{RecordStore, StoreError};

/// Result of a registration call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub wallet_address: String,

    pub score: u16,

    pub profile_tier: Tier,

    /// Present for blended-mode first registrations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_breakdown: Option<ScoringBreakdown>,

    /// False when the address was already registered
    pub newly_created: bool,
}

/// Profile projection returned by lookups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub wallet_address: String,
    pub profile_tier: Tier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Decision returned for a scoring request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringDecision {
    pub eligible: bool,
    pub profile_assigned: Tier,
    pub max_amount: Decimal,
    pub request_id: Uuid,
}

/// Acknowledgement for a recorded payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment_id: Uuid,
    pub score: u16,
    pub profile_tier: Tier,
}

/// Credit scoring service wiring a wallet activity provider and a record
/// store to the pure domain functions.
pub struct CreditService<P, S> {
    provider: P,
    store: S,
    fetch_timeout: Duration,
}

impl<P, S> CreditService<P, S>
where
    P: ActivityProvider,
    S: RecordStore,
{
    pub fn new(provider: P, store: S, config: &EngineConfig) -> Self {
        Self {
            provider,
            store,
            fetch_timeout: Duration::from_millis(config.horizon.fetch_timeout_ms),
        }
    }

    /// Register a wallet address, scoring it with the chosen mode.
    ///
    /// Registering a known address is an idempotent no-op: the stored
    /// profile comes back unchanged, with no rescoring.
    #[instrument(skip(self, questionnaire))]
    pub async fn register(
        &self,
        address: &str,
        questionnaire: QuestionnaireAnswers,
        mode: ScoringMode,
    ) -> Result<Registration> {
        if let Some(existing) = self.store.find_profile_by_address(address).await {
            info!(%address, "address already registered");
            return Ok(existing_registration(existing));
        }

        let (score, activity, breakdown) = match mode {
            ScoringMode::Questionnaire => (questionnaire_score(&questionnaire), None, None),
            ScoringMode::Activity => {
                let activity = self.fetch_activity(address).await;
                let score = activity_only_score(address, &activity)?;
                (score, Some(activity), None)
            }
            ScoringMode::Blended => {
                let activity = self.fetch_activity(address).await;
                let breakdown = blended_score(&questionnaire, &activity);
                (breakdown.final_score, Some(activity), Some(breakdown))
            }
        };

        let profile = CreditProfile::new(address, score, questionnaire, activity, breakdown);
        let stored = match self.store.create_profile(profile).await {
            Ok(stored) => stored,
            // Lost a concurrent registration race; the first write wins.
            Err(StoreError::ProfileExists(_)) => {
                let existing = self
                    .store
                    .find_profile_by_address(address)
                    .await
                    .ok_or_else(|| {
                        TierlineError::Storage(format!(
                            "profile vanished after conflicting create: {address}"
                        ))
                    })?;
                return Ok(existing_registration(existing));
            }
            Err(err) => return Err(err.into()),
        };

        info!(
            %address,
            score = stored.score,
            tier = %stored.profile_tier,
            ?mode,
            "registered new profile"
        );

        Ok(Registration {
            wallet_address: stored.wallet_address,
            score: stored.score,
            profile_tier: stored.profile_tier,
            scoring_breakdown: stored.scoring_breakdown,
            newly_created: true,
        })
    }

    /// Look up the stored profile for an address.
    pub async fn login(&self, address: &str) -> Result<CreditProfile> {
        self.store
            .find_profile_by_address(address)
            .await
            .ok_or_else(|| LookupError::ProfileNotFound(address.to_string()).into())
    }

    /// Public projection of a stored profile.
    pub async fn profile(&self, address: &str) -> Result<ProfileView> {
        let profile = self.login(address).await?;
        Ok(ProfileView {
            wallet_address: profile.wallet_address,
            profile_tier: profile.profile_tier,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        })
    }

    /// Replace a lender's risk profiles wholesale, creating the lender on
    /// first sight of the API key.
    #[instrument(skip_all)]
    pub async fn define_profiles(
        &self,
        api_key: &str,
        name: Option<String>,
        profiles: Vec<RiskProfile>,
    ) -> Result<Lender> {
        let lender = self
            .store
            .upsert_lender_profiles(api_key, name, profiles)
            .await?;

        info!(
            lender_id = %lender.id,
            profile_count = lender.profiles.len(),
            "lender profiles replaced"
        );

        Ok(lender)
    }

    /// Evaluate a requested amount against a lender's profiles and record
    /// the decision. Every call creates a new immutable request record.
    #[instrument(skip(self))]
    pub async fn request_scoring(
        &self,
        address: &str,
        lender_id: Uuid,
        requested_amount: Decimal,
    ) -> Result<ScoringDecision> {
        let profile = self.login(address).await?;
        let lender = self
            .store
            .find_lender_by_id(&lender_id)
            .await
            .ok_or_else(|| LookupError::LenderNotFound(lender_id.to_string()))?;

        let decision = evaluate_eligibility(profile.score, &lender.profiles, requested_amount);
        let status = if decision.eligible {
            RequestStatus::Approved
        } else {
            RequestStatus::Rejected
        };

        let request = LoanRequest::new(
            &profile.wallet_address,
            lender.id,
            requested_amount,
            decision.profile_assigned,
            decision.max_amount,
            status,
        );
        let stored = self.store.create_loan_request(request).await?;

        info!(
            request_id = %stored.id,
            eligible = decision.eligible,
            tier = %decision.profile_assigned,
            "scoring request evaluated"
        );

        Ok(ScoringDecision {
            eligible: decision.eligible,
            profile_assigned: decision.profile_assigned,
            max_amount: decision.max_amount,
            request_id: stored.id,
        })
    }

    /// Record a payment outcome and apply its score adjustment.
    ///
    /// Lender and profile must both resolve before anything is written.
    /// The event is appended first, then score and tier land in a single
    /// atomic store update.
    #[instrument(skip_all)]
    pub async fn report_payment(&self, report: PaymentReport) -> Result<PaymentReceipt> {
        let lender = self
            .store
            .find_lender_by_key(&report.api_key)
            .await
            .ok_or_else(|| LookupError::LenderNotFound("unknown API key".to_string()))?;
        let profile = self.login(&report.wallet_address).await?;

        let event = PaymentEvent::new(
            &report.wallet_address,
            lender.id,
            report.amount,
            report.outcome,
            report.payment_date,
            report.request_id,
        );
        let stored_event = self.store.create_payment_event(event).await?;

        let adjustment = adjust_score(profile.score, report.outcome);
        let updated = self
            .store
            .update_profile_score(
                &report.wallet_address,
                adjustment.score,
                adjustment.profile_tier,
            )
            .await?;

        info!(
            payment_id = %stored_event.id,
            outcome = ?report.outcome,
            score = updated.score,
            tier = %updated.profile_tier,
            "payment recorded"
        );

        Ok(PaymentReceipt {
            payment_id: stored_event.id,
            score: updated.score,
            profile_tier: updated.profile_tier,
        })
    }

    /// Fetch activity under the configured budget. Failures and timeouts
    /// degrade to the unavailable value; the scoring mode decides whether
    /// that is recoverable.
    async fn fetch_activity(&self, address: &str) -> WalletActivity {
        match timeout(self.fetch_timeout, self.provider.fetch_activity(address)).await {
            Ok(Ok(activity)) => activity,
            Ok(Err(err)) => {
                warn!(%address, error = %err, "activity fetch failed");
                WalletActivity::unavailable()
            }
            Err(_) => {
                warn!(
                    %address,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "activity fetch timed out"
                );
                WalletActivity::unavailable()
            }
        }
    }
}

fn existing_registration(profile: CreditProfile) -> Registration {
    Registration {
        wallet_address: profile.wallet_address,
        score: profile.score,
        profile_tier: profile.profile_tier,
        scoring_breakdown: None,
        newly_created: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::domain::scoring::ActivityWeights;
    use crate::infra::activity::{FixtureProvider, MockActivityProvider, ProviderError};
    use crate::infra::record_store::InMemoryStore;

    const WALLET: &str = "GDUKEWALLETTESTADDRESS";

    fn active_wallet() -> WalletActivity {
        WalletActivity {
            wallet_age_days: 730,
            total_transactions: 60,
            successful_transactions: 57,
            average_balance: 500.0,
            trustline_count: 2,
            operations_count: 90,
            first_activity: None,
            is_valid: true,
        }
    }

    fn questionnaire() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            defi_interactions: 70.0, // 300 + 350 = 650
            ..Default::default()
        }
    }

    fn service_with(provider: FixtureProvider) -> CreditService<FixtureProvider, InMemoryStore> {
        CreditService::new(provider, InMemoryStore::new(), &EngineConfig::default())
    }

    fn risk_profiles() -> Vec<RiskProfile> {
        vec![
            RiskProfile {
                tier: Tier::A,
                min_score: 700,
                max_amount: dec!(10000),
                interest_rate: 8.5,
            },
            RiskProfile {
                tier: Tier::B,
                min_score: 600,
                max_amount: dec!(5000),
                interest_rate: 12.0,
            },
            RiskProfile {
                tier: Tier::C,
                min_score: 300,
                max_amount: dec!(1000),
                interest_rate: 20.0,
            },
        ]
    }

    fn paid_report(api_key: &str) -> PaymentReport {
        PaymentReport {
            api_key: api_key.to_string(),
            wallet_address: WALLET.to_string(),
            amount: dec!(100),
            outcome: tierline_common::PaymentOutcome::Paid,
            payment_date: Utc::now(),
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let service = service_with(FixtureProvider::new());

        let first = service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();
        assert!(first.newly_created);
        assert_eq!(first.score, 650);
        assert_eq!(first.profile_tier, Tier::B);

        let second = service
            .register(WALLET, QuestionnaireAnswers::default(), ScoringMode::Questionnaire)
            .await
            .unwrap();
        assert!(!second.newly_created);
        assert_eq!(second.score, 650);
    }

    #[tokio::test]
    async fn test_blended_register_stores_breakdown_and_snapshot() {
        let provider = FixtureProvider::new().with_account(WALLET, active_wallet());
        let service = service_with(provider);

        let registration = service
            .register(WALLET, questionnaire(), ScoringMode::Blended)
            .await
            .unwrap();

        let breakdown = registration.scoring_breakdown.unwrap();
        assert_eq!(breakdown.questionnaire_score, 650);
        assert_eq!(breakdown.final_score, registration.score);

        let profile = service.login(WALLET).await.unwrap();
        assert_eq!(profile.activity_snapshot.unwrap(), active_wallet());
        assert_eq!(profile.profile_tier, Tier::for_score(profile.score));
    }

    #[tokio::test]
    async fn test_blended_register_survives_provider_failure() {
        let mut provider = MockActivityProvider::new();
        provider
            .expect_fetch_activity()
            .returning(|_| Err(ProviderError::Transport("connection refused".into())));
        let service =
            CreditService::new(provider, InMemoryStore::new(), &EngineConfig::default());

        let registration = service
            .register(WALLET, questionnaire(), ScoringMode::Blended)
            .await
            .unwrap();

        // Fallback: questionnaire score, zero wallet contribution.
        assert_eq!(registration.score, 650);
        let breakdown = registration.scoring_breakdown.unwrap();
        assert_eq!(breakdown.stellar_score, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blended_register_survives_fetch_timeout() {
        struct StuckProvider;

        #[async_trait]
        impl ActivityProvider for StuckProvider {
            async fn fetch_activity(
                &self,
                _address: &str,
            ) -> std::result::Result<WalletActivity, ProviderError> {
                std::future::pending().await
            }
        }

        let service =
            CreditService::new(StuckProvider, InMemoryStore::new(), &EngineConfig::default());

        let registration = service
            .register(WALLET, questionnaire(), ScoringMode::Blended)
            .await
            .unwrap();
        assert_eq!(registration.score, 650);
        assert_eq!(registration.scoring_breakdown.unwrap().stellar_score, 0);
    }

    #[tokio::test]
    async fn test_activity_register_requires_resolvable_wallet() {
        let service = service_with(FixtureProvider::new());

        let err = service
            .register(WALLET, QuestionnaireAnswers::default(), ScoringMode::Activity)
            .await
            .unwrap_err();
        assert!(matches!(err, TierlineError::Scoring(_)));

        // No record may be created on this path.
        assert!(service.login(WALLET).await.is_err());
    }

    #[tokio::test]
    async fn test_activity_register_scores_within_cap() {
        let provider = FixtureProvider::new().with_account(WALLET, active_wallet());
        let service = service_with(provider);

        let registration = service
            .register(WALLET, QuestionnaireAnswers::default(), ScoringMode::Activity)
            .await
            .unwrap();

        assert!(f64::from(registration.score) <= ActivityWeights::CAPPED.max_total());
        assert!(registration.scoring_breakdown.is_none());
    }

    #[tokio::test]
    async fn test_profile_projection() {
        let service = service_with(FixtureProvider::new());
        service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();

        let view = service.profile(WALLET).await.unwrap();
        assert_eq!(view.wallet_address, WALLET);
        assert_eq!(view.profile_tier, Tier::B);
        assert_eq!(view.created_at, view.updated_at);
    }

    #[tokio::test]
    async fn test_login_unknown_address() {
        let service = service_with(FixtureProvider::new());
        let err = service.login(WALLET).await.unwrap_err();
        assert!(matches!(err, TierlineError::Lookup(_)));
    }

    #[tokio::test]
    async fn test_request_scoring_records_decision() {
        let service = service_with(FixtureProvider::new());
        service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();
        let lender = service
            .define_profiles("key-1", Some("Acme Credit".into()), risk_profiles())
            .await
            .unwrap();

        let approved = service
            .request_scoring(WALLET, lender.id, dec!(4000))
            .await
            .unwrap();
        assert!(approved.eligible);
        assert_eq!(approved.profile_assigned, Tier::B);
        assert_eq!(approved.max_amount, dec!(5000));

        let rejected = service
            .request_scoring(WALLET, lender.id, dec!(6000))
            .await
            .unwrap();
        assert!(!rejected.eligible);
        // A new record per evaluation, never an update.
        assert_ne!(approved.request_id, rejected.request_id);
    }

    #[tokio::test]
    async fn test_request_scoring_unknown_lender() {
        let service = service_with(FixtureProvider::new());
        service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();

        let err = service
            .request_scoring(WALLET, Uuid::new_v4(), dec!(100))
            .await
            .unwrap_err();
        assert!(matches!(err, TierlineError::Lookup(_)));
    }

    #[tokio::test]
    async fn test_report_payment_adjusts_score_and_tier() {
        let service = service_with(FixtureProvider::new());
        service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();
        service
            .define_profiles("key-1", None, risk_profiles())
            .await
            .unwrap();

        let receipt = service.report_payment(paid_report("key-1")).await.unwrap();
        assert_eq!(receipt.score, 660);
        assert_eq!(receipt.profile_tier, Tier::B);

        let mut defaulted = paid_report("key-1");
        defaulted.outcome = tierline_common::PaymentOutcome::Defaulted;
        let receipt = service.report_payment(defaulted).await.unwrap();
        assert_eq!(receipt.score, 630);
        assert_eq!(receipt.profile_tier, Tier::C);

        let profile = service.login(WALLET).await.unwrap();
        assert_eq!(profile.score, 630);
        assert_eq!(profile.profile_tier, Tier::for_score(profile.score));
    }

    #[tokio::test]
    async fn test_report_payment_unknown_api_key() {
        let service = service_with(FixtureProvider::new());
        service
            .register(WALLET, questionnaire(), ScoringMode::Questionnaire)
            .await
            .unwrap();

        let err = service.report_payment(paid_report("bad-key")).await.unwrap_err();
        assert!(matches!(err, TierlineError::Lookup(_)));
    }
}
