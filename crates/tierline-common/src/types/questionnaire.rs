//! Self-reported registration questionnaire

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answers supplied at registration.
///
/// Every numeric claim is optional on the wire and defaults to 0; negative
/// claims carry no weight when scored. Unrecognized fields are carried
/// through untouched in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    /// Claimed wallet age in months
    #[serde(default, rename = "walletAge")]
    pub wallet_age_months: f64,

    /// Claimed average balance
    #[serde(default, rename = "averageBalance")]
    pub average_balance: f64,

    /// Claimed number of transactions
    #[serde(default, rename = "transactionCount")]
    pub transaction_count: f64,

    /// Claimed number of DeFi interactions
    #[serde(default, rename = "defiInteractions")]
    pub defi_interactions: f64,

    /// Claimed monthly income
    #[serde(default, rename = "monthlyIncome")]
    pub monthly_income: f64,

    /// Stated purpose of the loan
    #[serde(default, rename = "loanPurpose", skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<String>,

    /// Free-form extension fields
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_zero() {
        let answers: QuestionnaireAnswers = serde_json::from_str("{}").unwrap();
        assert_eq!(answers.wallet_age_months, 0.0);
        assert_eq!(answers.monthly_income, 0.0);
        assert!(answers.loan_purpose.is_none());
    }

    #[test]
    fn test_extension_fields_are_kept() {
        let json = r#"{"walletAge": 12, "employmentYears": 3}"#;
        let answers: QuestionnaireAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(answers.wallet_age_months, 12.0);
        assert_eq!(answers.extra["employmentYears"], 3);
    }
}
