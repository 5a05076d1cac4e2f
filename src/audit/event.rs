use crate::audit::canonical;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub ts_utc: String, // RFC3339 UTC string
    pub event_type: String,
    pub report_id: String,
    pub actor: Actor,
    pub details: serde_json::Value,
    pub prev_event_hash: String, // hex 64
    pub event_hash: String,      // hex 64
}

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";

// event_hash = SHA-256(canonical bytes of the envelope with event_hash forced
// to ZERO_HASH_64), so the hash covers every field including its own slot.
pub fn compute_event_hash(event: &AuditEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.event_hash = ZERO_HASH_64.to_string();
    let bytes = canonical::to_canonical_bytes(&e)?;
    let mut h = Sha256::new();
    h.update(bytes);
    Ok(hex::encode(h.finalize()))
}

pub fn finalize_event(mut event: AuditEvent) -> CoreResult<AuditEvent> {
    if event.prev_event_hash.len() != 64
        || !event.prev_event_hash.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CoreError::InvalidInput(
            "prev_event_hash must be 64 hex chars".to_string(),
        ));
    }
    validate_event_taxonomy(&event)?;
    let eh = compute_event_hash(&event)?;
    event.event_hash = eh;
    Ok(event)
}

fn validate_event_taxonomy(event: &AuditEvent) -> CoreResult<()> {
    let allowed = [
        "REPORT_CREATED",
        "REPORT_DEDUPLICATED",
        "VOTE_CAST",
        "REPORT_FINALIZED",
    ];
    if !allowed.contains(&event.event_type.as_str()) {
        return Err(CoreError::InvalidInput(format!(
            "unknown event_type {}",
            event.event_type
        )));
    }
    if event.report_id.is_empty() {
        return Err(CoreError::InvalidInput(format!(
            "event {} missing report_id",
            event.event_type
        )));
    }
    let required = required_detail_keys(&event.event_type);
    for k in required {
        if event.details.get(k).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "event {} missing details.{}",
                event.event_type, k
            )));
        }
    }
    Ok(())
}

fn required_detail_keys(event_type: &str) -> &'static [&'static str] {
    match event_type {
        "REPORT_CREATED" => &[
            "source_kind",
            "label",
            "score_pct",
            "content_sha256",
            "submitter_id",
            "classifier_degraded",
        ],
        "REPORT_DEDUPLICATED" => &["content_sha256", "submitter_id"],
        "VOTE_CAST" => &["voter_id", "vote_type", "approve_votes", "reject_votes"],
        "REPORT_FINALIZED" => &["outcome", "approve_votes", "reject_votes", "total_votes"],
        _ => &[],
    }
}
