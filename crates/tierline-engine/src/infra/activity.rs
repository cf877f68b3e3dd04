//! Wallet activity providers
//!
//! Activity lookup is abstracted behind [`ActivityProvider`] so scoring is
//! testable without network access: [`HorizonProvider`] talks to a live
//! Stellar Horizon instance, [`FixtureProvider`] serves canned accounts.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use tierline_common::WalletActivity;

use crate::config::HorizonSettings;

/// Trait for wallet activity sources
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityProvider: Send + Sync {
    /// Fetch activity metrics for an address.
    async fn fetch_activity(&self, address: &str) -> Result<WalletActivity, ProviderError>;
}

/// Errors from activity lookups
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Ledger API error: status {0}")]
    Api(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<ProviderError> for tierline_common::TierlineError {
    fn from(err: ProviderError) -> Self {
        tierline_common::TierlineError::Provider(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct HorizonAccount {
    balances: Vec<HorizonBalance>,
}

#[derive(Debug, Deserialize)]
struct HorizonBalance {
    balance: String,
    asset_type: String,
}

#[derive(Debug, Deserialize)]
struct HorizonPage<T> {
    #[serde(rename = "_embedded")]
    embedded: HorizonRecords<T>,
}

#[derive(Debug, Deserialize)]
struct HorizonRecords<T> {
    records: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HorizonTransaction {
    successful: bool,
    created_at: DateTime<Utc>,
}

/// Operations are only counted, so the record body is ignored.
#[derive(Debug, Deserialize)]
struct HorizonOperation {}

/// Live Stellar Horizon client.
pub struct HorizonProvider {
    client: reqwest::Client,
    base_url: String,
    page_limit: u32,
}

impl HorizonProvider {
    pub fn new(settings: &HorizonSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(settings.fetch_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            page_limit: settings.page_limit,
        })
    }

    async fn fetch_account(&self, address: &str) -> Result<HorizonAccount, ProviderError> {
        let url = format!("{}/accounts/{}", self.base_url, address);
        let response = self.client.get(&url).send().await?;

        match response.status().as_u16() {
            200 => decode(response).await,
            404 => Err(ProviderError::AccountNotFound(address.to_string())),
            status => Err(ProviderError::Api(status)),
        }
    }

    async fn fetch_first_transaction(
        &self,
        address: &str,
    ) -> Result<Option<HorizonTransaction>, ProviderError> {
        let url = format!(
            "{}/accounts/{}/transactions?order=asc&limit=1",
            self.base_url, address
        );
        let page: HorizonPage<HorizonTransaction> = self.get_page(&url).await?;
        Ok(page.embedded.records.into_iter().next())
    }

    async fn fetch_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<HorizonTransaction>, ProviderError> {
        let url = format!(
            "{}/accounts/{}/transactions?order=desc&limit={}",
            self.base_url, address, self.page_limit
        );
        let page: HorizonPage<HorizonTransaction> = self.get_page(&url).await?;
        Ok(page.embedded.records)
    }

    async fn fetch_operations(&self, address: &str) -> Result<u32, ProviderError> {
        let url = format!(
            "{}/accounts/{}/operations?order=desc&limit={}",
            self.base_url, address, self.page_limit
        );
        let page: HorizonPage<HorizonOperation> = self.get_page(&url).await?;
        Ok(page.embedded.records.len() as u32)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: &str) -> Result<HorizonPage<T>, ProviderError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(ProviderError::Api(status));
        }
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    response
        .json()
        .await
        .map_err(|err| ProviderError::InvalidResponse(err.to_string()))
}

#[async_trait]
impl ActivityProvider for HorizonProvider {
    async fn fetch_activity(&self, address: &str) -> Result<WalletActivity, ProviderError> {
        let account = self.fetch_account(address).await?;
        let first_tx = self.fetch_first_transaction(address).await?;
        let history = self.fetch_transactions(address).await?;

        // A missing operations endpoint degrades to a zero count, it never
        // fails the whole fetch.
        let operations_count = match self.fetch_operations(address).await {
            Ok(count) => count,
            Err(err) => {
                warn!(%address, error = %err, "operations lookup failed, counting zero");
                0
            }
        };

        let first_activity = first_tx.map(|tx| tx.created_at);
        let wallet_age_days = first_activity
            .map(|first| (Utc::now() - first).num_days().max(0) as u32)
            .unwrap_or(0);

        let total_transactions = history.len() as u32;
        let successful_transactions = history.iter().filter(|tx| tx.successful).count() as u32;

        let average_balance = account
            .balances
            .iter()
            .find(|b| b.asset_type == "native")
            .and_then(|b| b.balance.parse::<f64>().ok())
            .unwrap_or(0.0);

        let trustline_count = account
            .balances
            .iter()
            .filter(|b| b.asset_type != "native")
            .count() as u32;

        debug!(
            %address,
            wallet_age_days,
            total_transactions,
            trustline_count,
            "fetched wallet activity"
        );

        Ok(WalletActivity {
            wallet_age_days,
            total_transactions,
            successful_transactions,
            average_balance,
            trustline_count,
            operations_count,
            first_activity,
            is_valid: true,
        })
    }
}

/// Canned activity provider for tests and offline runs.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    accounts: HashMap<String, WalletActivity>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canned account.
    pub fn with_account(mut self, address: impl Into<String>, activity: WalletActivity) -> Self {
        self.accounts.insert(address.into(), activity);
        self
    }
}

#[async_trait]
impl ActivityProvider for FixtureProvider {
    async fn fetch_activity(&self, address: &str) -> Result<WalletActivity, ProviderError> {
        self.accounts
            .get(address)
            .cloned()
            .ok_or_else(|| ProviderError::AccountNotFound(address.to_string()))
    }
}
