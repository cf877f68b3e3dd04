//! Core data types for the Tierline credit engine

pub mod credit_profile;
pub mod lender;
pub mod loan_request;
pub mod payment;
pub mod questionnaire;
pub mod tier;
pub mod wallet_activity;
