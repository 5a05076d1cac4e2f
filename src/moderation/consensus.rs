use crate::error::{CoreError, CoreResult};
use crate::report::model::{Report, ReportStatus, VoteType};

#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub report: Report,
    /// True when this vote crossed the threshold and froze the status.
    pub finalized: bool,
}

/// Applies one vote to a snapshot of a report and, when the threshold is
/// reached, resolves the final status. Pure with respect to the store: the
/// caller commits the returned record with a version-checked update and
/// retries on conflict, which is what serializes the precondition checks.
///
/// Tie policy: an even split at the threshold finalizes as `Rejected`; an
/// even split is not an endorsement.
pub fn apply_vote(
    current: &Report,
    voter_id: &str,
    vote: VoteType,
    vote_threshold: u32,
) -> CoreResult<VoteOutcome> {
    if !current.is_pending() {
        return Err(CoreError::AlreadyFinalized(current.report_id.clone()));
    }
    if current.voted_by.contains(voter_id) {
        return Err(CoreError::DuplicateVote(voter_id.to_string()));
    }

    let mut updated = current.clone();
    match vote {
        VoteType::Approve => updated.approve_votes += 1,
        VoteType::Reject => updated.reject_votes += 1,
    }
    updated.voted_by.insert(voter_id.to_string());

    let finalized = updated.total_votes() >= vote_threshold;
    if finalized {
        updated.status = if updated.approve_votes > updated.reject_votes {
            ReportStatus::Approved
        } else {
            ReportStatus::Rejected
        };
    }
    Ok(VoteOutcome {
        report: updated,
        finalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::interface::Classification;
    use crate::report::model::SourceKind;

    fn pending_report() -> Report {
        Report::new(
            SourceKind::Text,
            "breaking: bridge closure".to_string(),
            Classification {
                label: "Misinformation".to_string(),
                score: 91.0,
            },
        )
    }

    #[test]
    fn vote_updates_counter_and_membership_together() {
        let report = pending_report();
        let out = apply_vote(&report, "alice", VoteType::Approve, 10).unwrap();
        assert_eq!(out.report.approve_votes, 1);
        assert_eq!(out.report.reject_votes, 0);
        assert!(out.report.voted_by.contains("alice"));
        assert_eq!(
            out.report.total_votes() as usize,
            out.report.voted_by.len()
        );
        assert!(!out.finalized);
        assert_eq!(out.report.status, ReportStatus::Pending);
    }

    #[test]
    fn duplicate_voter_is_rejected() {
        let report = pending_report();
        let out = apply_vote(&report, "alice", VoteType::Approve, 10).unwrap();
        let err = apply_vote(&out.report, "alice", VoteType::Reject, 10).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateVote(_)));
    }

    #[test]
    fn threshold_finalizes_by_majority() {
        let report = pending_report();
        let out = apply_vote(&report, "alice", VoteType::Approve, 1).unwrap();
        assert!(out.finalized);
        assert_eq!(out.report.status, ReportStatus::Approved);
    }

    #[test]
    fn tie_at_threshold_finalizes_rejected() {
        let report = pending_report();
        let out = apply_vote(&report, "alice", VoteType::Approve, 2).unwrap();
        let out = apply_vote(&out.report, "bob", VoteType::Reject, 2).unwrap();
        assert!(out.finalized);
        assert_eq!(out.report.status, ReportStatus::Rejected);
        assert_eq!(out.report.approve_votes, 1);
        assert_eq!(out.report.reject_votes, 1);
    }

    #[test]
    fn finalized_report_refuses_further_votes() {
        let report = pending_report();
        let out = apply_vote(&report, "alice", VoteType::Approve, 1).unwrap();
        let err = apply_vote(&out.report, "bob", VoteType::Reject, 1).unwrap_err();
        assert!(matches!(err, CoreError::AlreadyFinalized(_)));
    }
}
