//! Assignment review and voucher redemption engine.
//!
//! Inspects HITs sequentially and, for each `Submitted` assignment,
//! classifies the submitted voucher code against the database and performs
//! the redemption effects: status update, then assignment approval. The two
//! effects are not transactional; if approval fails after the update the
//! voucher stays redeemed and a warning is emitted for manual
//! reconciliation. Intended to be run by one operator at a time.

use chrono::Utc;
use sqlx::MySqlPool;

use amt_voucher_core::answer::SubmittedAnswer;
use amt_voucher_core::hashing::voucher_code_digest;
use amt_voucher_core::types::DbId;
use amt_voucher_core::voucher::{
    classify, RedemptionCheck, RedemptionDecision, VoucherRecord, VoucherStatus,
};
use amt_voucher_core::CoreError;
use amt_voucher_db::models::voucher::VoucherRow;
use amt_voucher_db::VoucherRepo;
use amt_voucher_mturk::{AssignmentView, MturkClient};

/// Feedback sent with every approval.
pub const APPROVAL_FEEDBACK: &str = "Thank you for your work.";

/// Database side of the redemption effects.
#[allow(async_fn_in_trait)]
pub trait VoucherStore {
    /// Voucher records bound to a (worker, assignment) pair, ordered by
    /// `voucher_id` ascending.
    async fn vouchers_for_pair(
        &self,
        amt_worker_id: &str,
        amt_assignment_id: &str,
    ) -> anyhow::Result<Vec<VoucherRecord>>;

    /// Flip a voucher to redeemed, returning the number of rows affected.
    async fn mark_redeemed(&self, voucher_id: DbId) -> anyhow::Result<u64>;
}

impl VoucherStore for MySqlPool {
    async fn vouchers_for_pair(
        &self,
        amt_worker_id: &str,
        amt_assignment_id: &str,
    ) -> anyhow::Result<Vec<VoucherRecord>> {
        let rows =
            VoucherRepo::find_by_worker_assignment(self, amt_worker_id, amt_assignment_id).await?;
        Ok(rows.into_iter().map(VoucherRow::into_record).collect())
    }

    async fn mark_redeemed(&self, voucher_id: DbId) -> anyhow::Result<u64> {
        Ok(VoucherRepo::set_status(self, voucher_id, VoucherStatus::Redeemed).await?)
    }
}

/// AMT side of the redemption effects.
#[allow(async_fn_in_trait)]
pub trait AssignmentApprover {
    async fn approve(&self, assignment_id: &str, feedback: &str) -> anyhow::Result<()>;
}

impl AssignmentApprover for MturkClient {
    async fn approve(&self, assignment_id: &str, feedback: &str) -> anyhow::Result<()> {
        Ok(self.approve_assignment(assignment_id, feedback).await?)
    }
}

/// Shared handles for one review run.
pub struct ReviewContext<'a> {
    pub pool: &'a MySqlPool,
    pub client: &'a MturkClient,
    pub verbose: u8,
}

/// What happened to one submitted assignment.
#[derive(Debug, Clone)]
pub struct RedemptionOutcome {
    pub decision: RedemptionDecision,
    /// The voucher row was flipped to redeemed.
    pub status_updated: bool,
    /// The approval call succeeded.
    pub approved: bool,
    /// The approval call failed after the status update; the voucher and
    /// the assignment disagree until reconciled by hand.
    pub approval_failed: bool,
}

/// Inspect one HIT: print its summary (unless collapsed) and review every
/// submitted assignment. Failures on one assignment are logged and do not
/// stop the others.
pub async fn inspect_hit(ctx: &ReviewContext<'_>, hit_id: &str) -> anyhow::Result<()> {
    let summary = ctx.client.hit_summary(hit_id).await?;
    let now = Utc::now();
    if summary.should_print(now, ctx.verbose) {
        println!("{}", summary.render());
    }

    for assignment in ctx.client.assignments_for_hit(hit_id).await? {
        if !assignment.submitted {
            tracing::debug!(
                assignment_id = %assignment.assignment_id,
                status = %assignment.status,
                "Skipping non-submitted assignment"
            );
            continue;
        }
        if let Err(e) = review_assignment(ctx.pool, ctx.client, &assignment).await {
            tracing::error!(
                hit_id,
                assignment_id = %assignment.assignment_id,
                error = %e,
                "Assignment review failed, continuing with the next one"
            );
        }
    }

    if !summary.is_full(now) {
        println!();
    }
    Ok(())
}

/// Review one submitted assignment end to end.
pub async fn review_assignment<S, A>(
    store: &S,
    approver: &A,
    assignment: &AssignmentView,
) -> anyhow::Result<RedemptionOutcome>
where
    S: VoucherStore,
    A: AssignmentApprover,
{
    let answer_xml = assignment
        .answer_xml
        .as_deref()
        .ok_or_else(|| CoreError::AnswerParse("assignment has no answer document".into()))?;
    let answer = SubmittedAnswer::from_xml(answer_xml)?;
    println!("    AMT Worker ID {}", answer.worker_id);

    let submitted_hash = voucher_code_digest(&answer.voucher_code);
    let records = store
        .vouchers_for_pair(&answer.worker_id, &assignment.assignment_id)
        .await?;

    let decision = classify(&records, &submitted_hash);
    if decision.duplicate_rows > 0 {
        tracing::warn!(
            worker_id = %answer.worker_id,
            assignment_id = %assignment.assignment_id,
            ignored = decision.duplicate_rows,
            "More than one voucher row for this worker-assignment pair; \
             using the first and ignoring the rest"
        );
    }
    println!(
        "      Assignment ID: {} | voucher code {} | {}",
        assignment.assignment_id,
        decision.check.match_label(),
        decision.check.status_label(),
    );

    let mut outcome = RedemptionOutcome {
        decision,
        status_updated: false,
        approved: false,
        approval_failed: false,
    };

    if let RedemptionCheck::Eligible { voucher_id } = outcome.decision.check {
        let affected = store.mark_redeemed(voucher_id).await?;
        outcome.status_updated = true;
        println!(
            "      SET status_code={} | {affected} row(s) affected",
            VoucherStatus::Redeemed.code()
        );

        match approver
            .approve(&assignment.assignment_id, APPROVAL_FEEDBACK)
            .await
        {
            Ok(()) => {
                outcome.approved = true;
                println!("      Assignment successfully approved.");
            }
            Err(e) => {
                outcome.approval_failed = true;
                tracing::warn!(
                    assignment_id = %assignment.assignment_id,
                    voucher_id,
                    error = %e,
                    "Approval failed after the voucher was marked redeemed; \
                     reconcile manually"
                );
            }
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn answer_doc(worker_id: &str, code: &str) -> String {
        format!(
            "<QuestionFormAnswers xmlns=\"http://mechanicalturk.amazonaws.com/\
             AWSMechanicalTurkDataSchemas/2005-10-01/QuestionFormAnswers.xsd\">\
             <Answer><QuestionIdentifier>workerId</QuestionIdentifier>\
             <FreeText>{worker_id}</FreeText></Answer>\
             <Answer><QuestionIdentifier>voucherCode</QuestionIdentifier>\
             <FreeText>{code}</FreeText></Answer>\
             </QuestionFormAnswers>"
        )
    }

    fn submitted(assignment_id: &str, worker_id: &str, code: &str) -> AssignmentView {
        AssignmentView {
            assignment_id: assignment_id.to_string(),
            status: "Submitted".to_string(),
            submitted: true,
            answer_xml: Some(answer_doc(worker_id, code)),
        }
    }

    struct FakeStore {
        records: Vec<VoucherRecord>,
        redeemed: Mutex<Vec<DbId>>,
    }

    impl FakeStore {
        fn with_voucher(voucher_id: DbId, code: &str, status: VoucherStatus) -> Self {
            Self {
                records: vec![VoucherRecord {
                    voucher_id,
                    voucher_hash: voucher_code_digest(code),
                    status,
                }],
                redeemed: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self {
                records: Vec::new(),
                redeemed: Mutex::new(Vec::new()),
            }
        }
    }

    impl VoucherStore for FakeStore {
        async fn vouchers_for_pair(
            &self,
            _amt_worker_id: &str,
            _amt_assignment_id: &str,
        ) -> anyhow::Result<Vec<VoucherRecord>> {
            Ok(self.records.clone())
        }

        async fn mark_redeemed(&self, voucher_id: DbId) -> anyhow::Result<u64> {
            self.redeemed.lock().unwrap().push(voucher_id);
            Ok(1)
        }
    }

    #[derive(Default)]
    struct FakeApprover {
        fail: bool,
        approvals: Mutex<Vec<String>>,
    }

    impl AssignmentApprover for FakeApprover {
        async fn approve(&self, assignment_id: &str, feedback: &str) -> anyhow::Result<()> {
            assert_eq!(feedback, APPROVAL_FEEDBACK);
            self.approvals.lock().unwrap().push(assignment_id.to_string());
            if self.fail {
                anyhow::bail!("service unavailable");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn valid_voucher_is_redeemed_and_approved_exactly_once() {
        let store = FakeStore::with_voucher(7, "ABC123", VoucherStatus::Valid);
        let approver = FakeApprover::default();

        let outcome = review_assignment(&store, &approver, &submitted("A1", "W1", "ABC123"))
            .await
            .unwrap();

        assert!(outcome.decision.check.is_eligible());
        assert!(outcome.status_updated);
        assert!(outcome.approved);
        assert!(!outcome.approval_failed);
        assert_eq!(*store.redeemed.lock().unwrap(), vec![7]);
        assert_eq!(*approver.approvals.lock().unwrap(), vec!["A1"]);
    }

    #[tokio::test]
    async fn already_redeemed_voucher_is_not_approved_again() {
        let store = FakeStore::with_voucher(7, "ABC123", VoucherStatus::Redeemed);
        let approver = FakeApprover::default();

        let outcome = review_assignment(&store, &approver, &submitted("A1", "W1", "ABC123"))
            .await
            .unwrap();

        assert_eq!(
            outcome.decision.check,
            RedemptionCheck::AlreadyRedeemed { voucher_id: 7 }
        );
        assert!(!outcome.status_updated);
        assert!(!outcome.approved);
        assert!(store.redeemed.lock().unwrap().is_empty());
        assert!(approver.approvals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatched_code_has_no_effects() {
        let store = FakeStore::with_voucher(7, "ABC123", VoucherStatus::Valid);
        let approver = FakeApprover::default();

        let outcome = review_assignment(&store, &approver, &submitted("A1", "W1", "abc123"))
            .await
            .unwrap();

        assert!(matches!(
            outcome.decision.check,
            RedemptionCheck::Mismatch { .. }
        ));
        assert!(!outcome.status_updated);
        assert!(store.redeemed.lock().unwrap().is_empty());
        assert!(approver.approvals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_pair_has_no_effects() {
        let store = FakeStore::empty();
        let approver = FakeApprover::default();

        let outcome = review_assignment(&store, &approver, &submitted("A1", "W1", "ABC123"))
            .await
            .unwrap();

        assert_eq!(outcome.decision.check, RedemptionCheck::Unknown);
        assert!(!outcome.status_updated);
        assert!(store.redeemed.lock().unwrap().is_empty());
        assert!(approver.approvals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn approval_failure_leaves_voucher_redeemed() {
        let store = FakeStore::with_voucher(7, "ABC123", VoucherStatus::Valid);
        let approver = FakeApprover {
            fail: true,
            ..Default::default()
        };

        let outcome = review_assignment(&store, &approver, &submitted("A1", "W1", "ABC123"))
            .await
            .unwrap();

        assert!(outcome.status_updated);
        assert!(!outcome.approved);
        assert!(outcome.approval_failed);
        // The inconsistency is reported, not rolled back.
        assert_eq!(*store.redeemed.lock().unwrap(), vec![7]);
        assert_eq!(approver.approvals.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_answer_document_is_an_error() {
        let store = FakeStore::empty();
        let approver = FakeApprover::default();
        let assignment = AssignmentView {
            assignment_id: "A1".to_string(),
            status: "Submitted".to_string(),
            submitted: true,
            answer_xml: None,
        };

        assert!(review_assignment(&store, &approver, &assignment)
            .await
            .is_err());
        assert!(approver.approvals.lock().unwrap().is_empty());
    }
}
