//! Thin wrapper over the AMT requester API.
//!
//! Owns client construction (credential profile, sandbox/live endpoint
//! selection) and the five operations the tooling needs, converting SDK
//! response shapes into the domain types from `amt-voucher-core`.

pub mod client;
pub mod convert;
pub mod error;

pub use client::{AssignmentView, MturkClient, LIVE_ENDPOINT, SANDBOX_ENDPOINT};
pub use error::MturkError;
