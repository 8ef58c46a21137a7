//! triage-core
//!
//! Pure domain types and rules for the triage responder: webhook signature
//! verification, keyword classification, the per-message decision, TwiML
//! rendering and object-key conventions. No AWS SDK dependency; adapters
//! plug in through the traits in [`traits`].

pub mod decision;
pub mod error;
pub mod models;
pub mod rules;
pub mod s3_keys;
pub mod signature;
pub mod store;
pub mod traits;
pub mod twiml;
