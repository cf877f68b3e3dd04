//! Tierline domain logic
//!
//! Pure scoring, eligibility, and payment-adjustment functions. Nothing
//! in this module performs I/O or knows about persistence.

pub mod eligibility;
pub mod payment;
pub mod scoring;
