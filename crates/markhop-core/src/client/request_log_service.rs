use std::time::Instant;

use chrono::Utc;

use crate::diagnostics::{DIAGNOSTIC_LOG_FILE, read_diagnostics};
use crate::error::{MarkhopError, Result};
use crate::models::{DiagnosticEntry, DiagnosticStatus};

use super::Markhop;

pub(super) fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Markhop {
    /// Newest request log entries first.
    pub fn recent_requests(&self, limit: usize) -> Result<Vec<DiagnosticEntry>> {
        let Some(log_dir) = &self.config.log_dir else {
            return Err(MarkhopError::Validation(
                "request log is disabled".to_string(),
            ));
        };
        read_diagnostics(&log_dir.join(DIAGNOSTIC_LOG_FILE), limit)
    }

    fn try_log_request(&self, entry: &DiagnosticEntry) {
        self.diagnostics.record(entry);
    }

    pub(super) fn log_request_status(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        path: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&DiagnosticEntry {
            request_id,
            operation: operation.to_string(),
            status: DiagnosticStatus::Ok,
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            path,
            error_code: None,
            error_message: None,
            details,
        });
    }

    pub(super) fn log_request_error(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        path: Option<String>,
        err: &MarkhopError,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&DiagnosticEntry {
            request_id,
            operation: operation.to_string(),
            status: DiagnosticStatus::Error,
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            path,
            error_code: Some(err.code().to_string()),
            error_message: Some(err.to_string()),
            details,
        });
    }

    /// The request still answered, with an empty result.
    pub(super) fn log_request_degraded(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        path: Option<String>,
        err: &MarkhopError,
    ) {
        self.try_log_request(&DiagnosticEntry {
            request_id,
            operation: operation.to_string(),
            status: DiagnosticStatus::Warning,
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            path,
            error_code: Some(err.code().to_string()),
            error_message: Some(err.to_string()),
            details: None,
        });
    }
}
