use crate::audit::event::{Actor, AuditEvent};
use crate::audit::log::AuditLog;
use crate::classifier::adapter::ClassifierAdapter;
use crate::classifier::interface::ClassifierClient;
use crate::error::{CoreError, CoreResult};
use crate::moderation::config::ConsensusConfig;
use crate::moderation::consensus::apply_vote;
use crate::moderation::ingest::{normalize_submission, SubmitRequest};
use crate::report::model::{content_sha256, now_rfc3339_utc, Report, VoteType};
use crate::report::store::{ReportStore, UpdateOutcome};
use std::sync::Mutex;

/// Facade over the ingestion gate, vote ledger and consensus resolver; this
/// is the contract the HTTP layer consumes. `&self` throughout — share one
/// instance behind `Arc` across request workers.
pub struct ModerationService<C: ClassifierClient, S: ReportStore> {
    store: S,
    classifier: ClassifierAdapter<C>,
    config: ConsensusConfig,
    audit: Mutex<AuditLog>,
}

impl<C: ClassifierClient, S: ReportStore> ModerationService<C, S> {
    pub fn new(store: S, classifier_client: C, config: ConsensusConfig, audit: AuditLog) -> Self {
        Self {
            store,
            classifier: ClassifierAdapter::new(classifier_client),
            config,
            audit: Mutex::new(audit),
        }
    }

    /// Submits content for classification. Idempotent on content: an
    /// identical (trimmed) submission returns the existing report without
    /// consulting the oracle again.
    pub fn submit(&self, req: &SubmitRequest) -> CoreResult<Report> {
        let (content, source_kind) = normalize_submission(req)?;

        if let Some(existing) = self.store.get_by_content(&content)? {
            self.audit_deduplicated(&existing, &req.submitter_id)?;
            return Ok(existing);
        }

        // The oracle call may block for its full timeout; it runs before any
        // store-side critical section. On failure the report is still
        // created, stamped with the fallback pair.
        let (classification, degraded) = self.classifier.classify_or_fallback(&content);
        let candidate = Report::new(source_kind, content, classification);
        let (report, inserted) = self.store.insert_if_absent(candidate)?;

        if inserted {
            self.append_event(AuditEvent {
                ts_utc: now_rfc3339_utc(),
                event_type: "REPORT_CREATED".to_string(),
                report_id: report.report_id.clone(),
                actor: Actor::User,
                details: serde_json::json!({
                    "source_kind": report.source_kind,
                    "label": report.label,
                    "score_pct": report.confidence_score.round() as i64,
                    "content_sha256": content_sha256(&report.content),
                    "submitter_id": req.submitter_id,
                    "classifier_degraded": degraded
                }),
                prev_event_hash: String::new(),
                event_hash: String::new(),
            })?;
        } else {
            // Lost a concurrent-submission race; the winner's record stands.
            self.audit_deduplicated(&report, &req.submitter_id)?;
        }
        Ok(report)
    }

    /// Casts one vote and, when the configured threshold is reached,
    /// finalizes the report. Precondition checks and the counter update are
    /// committed as a single version-checked write; on conflict the vote is
    /// re-evaluated against the fresh record, so a vote racing the finalizing
    /// vote resolves to `AlreadyFinalized` rather than being counted.
    pub fn cast_vote(&self, report_id: &str, voter_id: &str, vote: VoteType) -> CoreResult<Report> {
        for _ in 0..=self.config.max_update_retries {
            let current = self
                .store
                .get_by_id(report_id)?
                .ok_or_else(|| CoreError::NotFound(report_id.to_string()))?;
            let outcome = apply_vote(&current, voter_id, vote, self.config.vote_threshold)?;
            match self
                .store
                .update_if_version_matches(report_id, current.version, outcome.report)?
            {
                UpdateOutcome::Updated(report) => {
                    self.append_event(AuditEvent {
                        ts_utc: now_rfc3339_utc(),
                        event_type: "VOTE_CAST".to_string(),
                        report_id: report.report_id.clone(),
                        actor: Actor::User,
                        details: serde_json::json!({
                            "voter_id": voter_id,
                            "vote_type": vote.as_str(),
                            "approve_votes": report.approve_votes,
                            "reject_votes": report.reject_votes
                        }),
                        prev_event_hash: String::new(),
                        event_hash: String::new(),
                    })?;
                    if outcome.finalized {
                        self.append_event(AuditEvent {
                            ts_utc: now_rfc3339_utc(),
                            event_type: "REPORT_FINALIZED".to_string(),
                            report_id: report.report_id.clone(),
                            actor: Actor::System,
                            details: serde_json::json!({
                                "outcome": report.status,
                                "approve_votes": report.approve_votes,
                                "reject_votes": report.reject_votes,
                                "total_votes": report.total_votes()
                            }),
                            prev_event_hash: String::new(),
                            event_hash: String::new(),
                        })?;
                    }
                    return Ok(report);
                }
                UpdateOutcome::VersionConflict => continue,
            }
        }
        Err(CoreError::TransientFailure(format!(
            "vote update on {} exhausted {} retries",
            report_id, self.config.max_update_retries
        )))
    }

    /// All reports, newest first.
    pub fn list_all(&self) -> CoreResult<Vec<Report>> {
        self.store.list_all()
    }

    fn audit_deduplicated(&self, report: &Report, submitter_id: &str) -> CoreResult<()> {
        self.append_event(AuditEvent {
            ts_utc: now_rfc3339_utc(),
            event_type: "REPORT_DEDUPLICATED".to_string(),
            report_id: report.report_id.clone(),
            actor: Actor::User,
            details: serde_json::json!({
                "content_sha256": content_sha256(&report.content),
                "submitter_id": submitter_id
            }),
            prev_event_hash: String::new(),
            event_hash: String::new(),
        })?;
        Ok(())
    }

    fn append_event(&self, event: AuditEvent) -> CoreResult<()> {
        let mut audit = self
            .audit
            .lock()
            .map_err(|_| CoreError::TransientFailure("audit log mutex poisoned".to_string()))?;
        audit.append(event)?;
        Ok(())
    }
}
