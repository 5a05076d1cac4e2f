use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::str::FromStr;
use ulid::Ulid;

use crate::classifier::interface::Classification;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Url,
    Text,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Approve,
    Reject,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Approve => "approve",
            VoteType::Reject => "reject",
        }
    }
}

impl FromStr for VoteType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(VoteType::Approve),
            "reject" => Ok(VoteType::Reject),
            other => Err(CoreError::InvalidVote(other.to_string())),
        }
    }
}

/// A tracked unit of submitted content. Never deleted; once `status` leaves
/// `Pending` the vote counters and `voted_by` are frozen forever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub report_id: String,
    pub source_kind: SourceKind,
    /// Trimmed submission content; the deduplication key. Immutable.
    pub content: String,
    pub label: String,
    pub confidence_score: f64,
    pub status: ReportStatus,
    pub approve_votes: u32,
    pub reject_votes: u32,
    pub voted_by: BTreeSet<String>,
    pub created_at: String, // RFC3339 UTC
    /// Optimistic-concurrency token, bumped on every successful store update.
    pub version: u64,
}

impl Report {
    pub fn new(source_kind: SourceKind, content: String, classification: Classification) -> Self {
        Self {
            report_id: new_report_id(),
            source_kind,
            content,
            label: classification.label,
            confidence_score: classification.score,
            status: ReportStatus::Pending,
            approve_votes: 0,
            reject_votes: 0,
            voted_by: BTreeSet::new(),
            created_at: now_rfc3339_utc(),
            version: 0,
        }
    }

    pub fn total_votes(&self) -> u32 {
        self.approve_votes + self.reject_votes
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReportStatus::Pending
    }
}

pub fn new_report_id() -> String {
    format!("rpt_{}", Ulid::new())
}

pub fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap()
}

/// Hex SHA-256 of the normalized content; used in audit event details so the
/// log never carries raw submissions.
pub fn content_sha256(content: &str) -> String {
    let mut h = Sha256::new();
    h.update(content.as_bytes());
    hex::encode(h.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_type_parses_known_values_only() {
        assert_eq!("approve".parse::<VoteType>().unwrap(), VoteType::Approve);
        assert_eq!("reject".parse::<VoteType>().unwrap(), VoteType::Reject);
        assert!("abstain".parse::<VoteType>().is_err());
    }

    #[test]
    fn report_ids_are_prefixed_and_unique() {
        let a = new_report_id();
        let b = new_report_id();
        assert!(a.starts_with("rpt_"));
        assert_ne!(a, b);
    }
}
