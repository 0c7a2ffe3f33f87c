//! Domain logic for AMT voucher administration.
//!
//! Everything in this crate is side-effect free except [`hit_log`], which
//! reads and appends the local HIT creation log. Network and database
//! access live in the `amt-voucher-mturk` and `amt-voucher-db` crates.

pub mod answer;
pub mod error;
pub mod hashing;
pub mod hit_config;
pub mod hit_log;
pub mod question;
pub mod summary;
pub mod types;
pub mod voucher;

pub use error::CoreError;
