//! HIT summaries and the "needs attention" check.
//!
//! The review flow prints a summary block per HIT so the operator can see
//! which HITs still have open or pending slots. A HIT whose slots are fully
//! accounted for is "full" and its summary is suppressed at the default
//! verbosity to keep the output focused on HITs requiring attention.

use crate::types::Timestamp;

/// Read-only view of a HIT, sourced from GetHIT.
#[derive(Debug, Clone)]
pub struct HitSummary {
    pub hit_id: String,
    pub title: String,
    pub hit_status: String,
    pub max_assignments: i32,
    pub completed: i32,
    pub pending: i32,
    pub available: i32,
    pub expiration: Timestamp,
}

impl HitSummary {
    /// Whether all assignment slots are accounted for.
    ///
    /// Before expiration that means every slot completed; after expiration
    /// slots that were never taken (`available`) also count, since no
    /// further work can arrive.
    pub fn is_full(&self, now: Timestamp) -> bool {
        let expired = self.expiration < now;
        if !expired {
            self.completed == self.max_assignments
        } else {
            self.completed + self.available == self.max_assignments
        }
    }

    /// Whether to print the summary block at the given verbosity.
    pub fn should_print(&self, now: Timestamp, verbose: u8) -> bool {
        verbose > 0 || !self.is_full(now)
    }

    /// Multi-line report block for the operator.
    pub fn render(&self) -> String {
        format!(
            "HIT ID: {}\n  Title: {}\n  Status: {}\n  max | comp, pend, avail\n  {} | {}, {}, {}",
            self.hit_id,
            self.title,
            self.hit_status,
            self.max_assignments,
            self.completed,
            self.pending,
            self.available,
        )
    }
}
