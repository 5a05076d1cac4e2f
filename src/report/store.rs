use crate::error::CoreResult;
use crate::report::model::Report;

#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    Updated(Report),
    /// The record changed under the caller; re-read and retry.
    VersionConflict,
}

/// Persistence contract for reports. Implementations must make
/// `insert_if_absent` and `update_if_version_matches` atomic: the
/// content-uniqueness check and the version check may never be separated in
/// time from the write they guard.
pub trait ReportStore: Send + Sync {
    fn get_by_id(&self, report_id: &str) -> CoreResult<Option<Report>>;

    /// Exact match on normalized content (the deduplication key).
    fn get_by_content(&self, content: &str) -> CoreResult<Option<Report>>;

    /// Inserts `report` unless a record with identical content already
    /// exists. Returns the stored record and whether this call inserted it;
    /// on a content conflict the existing record wins and the candidate is
    /// discarded.
    fn insert_if_absent(&self, report: Report) -> CoreResult<(Report, bool)>;

    /// Replaces the record for `report_id` only if its current version equals
    /// `expected_version`; bumps the stored version on success. Unknown ids
    /// are `NotFound`. `updated.content` must equal the stored content.
    fn update_if_version_matches(
        &self,
        report_id: &str,
        expected_version: u64,
        updated: Report,
    ) -> CoreResult<UpdateOutcome>;

    /// All reports, newest first.
    fn list_all(&self) -> CoreResult<Vec<Report>>;
}
