//! Voucher table model.

use sqlx::FromRow;

use amt_voucher_core::types::DbId;
use amt_voucher_core::voucher::{VoucherRecord, VoucherStatus};

/// A row from the `voucher` table.
#[derive(Debug, Clone, FromRow)]
pub struct VoucherRow {
    pub voucher_id: DbId,
    pub amt_worker_id: String,
    pub amt_assignment_id: String,
    pub voucher_hash: String,
    pub status_code: i32,
}

impl VoucherRow {
    /// Project the row into the domain record used by the redemption
    /// decision.
    pub fn into_record(self) -> VoucherRecord {
        VoucherRecord {
            voucher_id: self.voucher_id,
            voucher_hash: self.voucher_hash,
            status: VoucherStatus::from_code(self.status_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_projects_to_record() {
        let row = VoucherRow {
            voucher_id: 7,
            amt_worker_id: "W1".to_string(),
            amt_assignment_id: "A1".to_string(),
            voucher_hash: "ab".repeat(64),
            status_code: 1,
        };
        let record = row.into_record();
        assert_eq!(record.voucher_id, 7);
        assert_eq!(record.status, VoucherStatus::Redeemed);
        assert_eq!(record.voucher_hash.len(), 128);
    }
}
