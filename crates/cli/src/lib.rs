//! Shared plumbing for the `create-hit` and `review-vouchers` binaries.

pub mod create;
pub mod paths;
pub mod prompt;
pub mod review;
pub mod telemetry;
