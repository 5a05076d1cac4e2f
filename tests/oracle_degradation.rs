use std::net::TcpListener;
use std::time::Duration;
use veritas_core::audit::log::AuditLog;
use veritas_core::classifier::interface::{ClassifierClient, FALLBACK_LABEL};
use veritas_core::classifier::oracle::HttpOracleClient;
use veritas_core::error::CoreError;
use veritas_core::moderation::config::ConsensusConfig;
use veritas_core::moderation::ingest::SubmitRequest;
use veritas_core::moderation::service::ModerationService;
use veritas_core::report::memory::MemoryReportStore;
use veritas_core::report::model::ReportStatus;

// Reserve a loopback port, then drop the listener so nothing answers on it.
fn dead_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/predict")
}

#[test]
fn unreachable_oracle_reports_unavailable() {
    let client = HttpOracleClient::new(&dead_endpoint(), Duration::from_millis(500)).unwrap();
    let err = client.classify("some claim").unwrap_err();
    assert!(matches!(err, CoreError::OracleUnavailable(_)));
}

#[test]
fn submit_succeeds_with_fallback_when_oracle_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let audit = AuditLog::open_or_create(dir.path().join("audit.ndjson")).unwrap();
    let client = HttpOracleClient::new(&dead_endpoint(), Duration::from_millis(500)).unwrap();
    let service = ModerationService::new(
        MemoryReportStore::new(),
        client,
        ConsensusConfig::default(),
        audit,
    );

    let report = service
        .submit(&SubmitRequest {
            url: None,
            text: Some("unclassifiable claim".to_string()),
            submitter_id: "alice".to_string(),
        })
        .unwrap();
    assert_eq!(report.label, FALLBACK_LABEL);
    assert_eq!(report.confidence_score, 0.0);
    assert_eq!(report.status, ReportStatus::Pending);
}
