//! Voucher status codes and the redemption decision.
//!
//! A voucher is redeemable at most once. The decision for one submitted
//! assignment is a pure function of the submitted code's digest and the
//! voucher rows bound to the `(worker, assignment)` pair, so it can be
//! tested without a database or an AMT account. The caller performs the
//! resulting effects (status update, assignment approval).
//!
//! The check-then-update sequence is not atomic: this tooling assumes a
//! single operator runs the review flow at a time. Two concurrent reviewers
//! reading the same `Valid` row before either writes can both redeem it.

use crate::types::DbId;

/// Persisted voucher lifecycle codes in the `voucher` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherStatus {
    /// Not yet redeemed, not expired.
    Valid,
    /// Redeemed; terminal for this tooling.
    Redeemed,
    /// Expired by an external process; never touched here.
    Expired,
}

impl VoucherStatus {
    /// Decode a `status_code` column value. Unrecognized codes are treated
    /// as expired, matching how the review tooling has always read them.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Valid,
            1 => Self::Redeemed,
            _ => Self::Expired,
        }
    }

    /// Encode for the `status_code` column.
    pub fn code(self) -> i32 {
        match self {
            Self::Valid => 0,
            Self::Redeemed => 1,
            Self::Expired => 2,
        }
    }

    /// Lowercase label used in operator-facing report lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Redeemed => "redeemed",
            Self::Expired => "expired",
        }
    }
}

/// A voucher row as seen by the redemption decision.
#[derive(Debug, Clone)]
pub struct VoucherRecord {
    pub voucher_id: DbId,
    pub voucher_hash: String,
    pub status: VoucherStatus,
}

/// Classification of one submitted voucher code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionCheck {
    /// No voucher row exists for the (worker, assignment) pair.
    Unknown,
    /// A row exists but the submitted code's digest does not match it.
    /// No action is taken regardless of the stored status.
    Mismatch { status: VoucherStatus },
    /// Digest matches and the voucher is still valid: redeem and approve.
    Eligible { voucher_id: DbId },
    /// Digest matches but the voucher was already redeemed.
    AlreadyRedeemed { voucher_id: DbId },
    /// Digest matches but the voucher expired.
    Expired { voucher_id: DbId },
}

impl RedemptionCheck {
    /// Whether the caller should update the status and approve the
    /// assignment.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible { .. })
    }

    /// `MATCH`/`MISMATCH`/`UNKNOWN` column for report lines.
    pub fn match_label(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Mismatch { .. } => "MISMATCH",
            _ => "MATCH",
        }
    }

    /// Stored-status column for report lines.
    pub fn status_label(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Mismatch { status } => status.label(),
            Self::Eligible { .. } => VoucherStatus::Valid.label(),
            Self::AlreadyRedeemed { .. } => VoucherStatus::Redeemed.label(),
            Self::Expired { .. } => VoucherStatus::Expired.label(),
        }
    }
}

/// Result of classifying one submitted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionDecision {
    pub check: RedemptionCheck,
    /// More than one row matched the (worker, assignment) pair; the first
    /// (lowest `voucher_id`) was used and the rest ignored.
    pub duplicate_rows: usize,
}

/// Decide what to do with a submitted voucher code.
///
/// `records` must be the rows for the exact `(amt_worker_id,
/// amt_assignment_id)` pair, ordered by `voucher_id` ascending;
/// `submitted_hash` is the SHA-512 hex digest of the submitted code.
pub fn classify(records: &[VoucherRecord], submitted_hash: &str) -> RedemptionDecision {
    let duplicate_rows = records.len().saturating_sub(1);

    let Some(record) = records.first() else {
        return RedemptionDecision {
            check: RedemptionCheck::Unknown,
            duplicate_rows: 0,
        };
    };

    let check = if record.voucher_hash != submitted_hash {
        RedemptionCheck::Mismatch {
            status: record.status,
        }
    } else {
        match record.status {
            VoucherStatus::Valid => RedemptionCheck::Eligible {
                voucher_id: record.voucher_id,
            },
            VoucherStatus::Redeemed => RedemptionCheck::AlreadyRedeemed {
                voucher_id: record.voucher_id,
            },
            VoucherStatus::Expired => RedemptionCheck::Expired {
                voucher_id: record.voucher_id,
            },
        }
    };

    RedemptionDecision {
        check,
        duplicate_rows,
    }
}
