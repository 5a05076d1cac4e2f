use crate::error::{CoreError, CoreResult};
use crate::report::model::Report;
use crate::report::store::{ReportStore, UpdateOutcome};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    by_id: HashMap<String, Report>,
    id_by_content: HashMap<String, String>,
    // insertion order of report ids; list_all returns the reverse
    order: Vec<String>,
}

/// In-memory `ReportStore`. Every trait operation is a single critical
/// section under one mutex, so check-then-insert and the version CAS are
/// atomic by construction. Lock scope never includes a classifier call.
#[derive(Default)]
pub struct MemoryReportStore {
    inner: Mutex<Inner>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> CoreResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CoreError::TransientFailure("report store mutex poisoned".to_string()))
    }
}

impl ReportStore for MemoryReportStore {
    fn get_by_id(&self, report_id: &str) -> CoreResult<Option<Report>> {
        Ok(self.lock()?.by_id.get(report_id).cloned())
    }

    fn get_by_content(&self, content: &str) -> CoreResult<Option<Report>> {
        let inner = self.lock()?;
        Ok(inner
            .id_by_content
            .get(content)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    fn insert_if_absent(&self, report: Report) -> CoreResult<(Report, bool)> {
        let mut inner = self.lock()?;
        if let Some(existing_id) = inner.id_by_content.get(&report.content) {
            let existing = inner
                .by_id
                .get(existing_id)
                .cloned()
                .ok_or_else(|| CoreError::NotFound(existing_id.clone()))?;
            return Ok((existing, false));
        }
        inner
            .id_by_content
            .insert(report.content.clone(), report.report_id.clone());
        inner.order.push(report.report_id.clone());
        inner.by_id.insert(report.report_id.clone(), report.clone());
        Ok((report, true))
    }

    fn update_if_version_matches(
        &self,
        report_id: &str,
        expected_version: u64,
        mut updated: Report,
    ) -> CoreResult<UpdateOutcome> {
        let mut inner = self.lock()?;
        let current = inner
            .by_id
            .get(report_id)
            .ok_or_else(|| CoreError::NotFound(report_id.to_string()))?;
        if current.version != expected_version {
            return Ok(UpdateOutcome::VersionConflict);
        }
        if current.content != updated.content {
            return Err(CoreError::InvalidInput(
                "report content is immutable".to_string(),
            ));
        }
        updated.version = expected_version + 1;
        inner
            .by_id
            .insert(report_id.to_string(), updated.clone());
        Ok(UpdateOutcome::Updated(updated))
    }

    fn list_all(&self) -> CoreResult<Vec<Report>> {
        let inner = self.lock()?;
        Ok(inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.by_id.get(id))
            .cloned()
            .collect())
    }
}
