//! MySQL access for the `voucher` table.
//!
//! Vouchers are created and expired by external processes; this crate only
//! reads rows and flips `status_code` to redeemed. All statements use bound
//! parameters.

pub mod models;
pub mod repositories;

pub use repositories::voucher_repo::VoucherRepo;
