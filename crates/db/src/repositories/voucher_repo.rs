//! Repository for the `voucher` table.

use sqlx::MySqlPool;

use amt_voucher_core::types::DbId;
use amt_voucher_core::voucher::VoucherStatus;

use crate::models::voucher::VoucherRow;

/// Column list for voucher queries.
const VOUCHER_COLUMNS: &str =
    "voucher_id, amt_worker_id, amt_assignment_id, voucher_hash, status_code";

/// Provides lookup and status updates for vouchers.
pub struct VoucherRepo;

impl VoucherRepo {
    /// Fetch the voucher rows bound to a (worker, assignment) pair.
    ///
    /// A well-formed table has at most one row per pair; ordering by
    /// `voucher_id` makes the first-row tie-break deterministic when the
    /// table is not well-formed.
    pub async fn find_by_worker_assignment(
        pool: &MySqlPool,
        amt_worker_id: &str,
        amt_assignment_id: &str,
    ) -> Result<Vec<VoucherRow>, sqlx::Error> {
        let query = format!(
            "SELECT {VOUCHER_COLUMNS} FROM voucher
             WHERE amt_worker_id = ? AND amt_assignment_id = ?
             ORDER BY voucher_id ASC"
        );
        sqlx::query_as::<_, VoucherRow>(&query)
            .bind(amt_worker_id)
            .bind(amt_assignment_id)
            .fetch_all(pool)
            .await
    }

    /// Set a voucher's status code, returning the number of rows affected.
    pub async fn set_status(
        pool: &MySqlPool,
        voucher_id: DbId,
        status: VoucherStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE voucher SET status_code = ? WHERE voucher_id = ?")
            .bind(status.code())
            .bind(voucher_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
