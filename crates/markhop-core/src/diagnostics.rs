use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{MarkhopError, Result};
use crate::jsonl::parse_jsonl_tolerant;
use crate::models::DiagnosticEntry;

pub const DIAGNOSTIC_LOG_FILE: &str = "requests.jsonl";

/// Receives one structured entry per handled request.
///
/// Recording never fails the caller; implementations swallow their own
/// I/O problems.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, entry: &DiagnosticEntry);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl DiagnosticSink for NoopDiagnostics {
    fn record(&self, _entry: &DiagnosticEntry) {}
}

#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl MemoryDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn record(&self, entry: &DiagnosticEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.clone());
        }
    }
}

/// Appends entries as JSON lines to `<dir>/requests.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlDiagnosticLog {
    path: PathBuf,
}

impl JsonlDiagnosticLog {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DIAGNOSTIC_LOG_FILE),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

impl DiagnosticSink for JsonlDiagnosticLog {
    fn record(&self, entry: &DiagnosticEntry) {
        if let Ok(serialized) = serde_json::to_string(entry) {
            let mut line = serialized;
            line.push('\n');
            let _ = self.append_line(&line);
        }
    }
}

/// Most recent entries first, at most `limit`.
pub fn read_diagnostics(path: &Path, limit: usize) -> Result<Vec<DiagnosticEntry>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };
    let parsed = parse_jsonl_tolerant::<DiagnosticEntry>(&raw);
    if parsed.items.is_empty() && parsed.skipped_lines > 0 {
        let first = parsed
            .first_error
            .map(|(line_no, message)| format!(" (first at line {line_no}: {message})"))
            .unwrap_or_default();
        return Err(MarkhopError::Validation(format!(
            "request log parse failed ({}): skipped {} invalid lines{first}",
            path.display(),
            parsed.skipped_lines
        )));
    }
    Ok(parsed.items.into_iter().rev().take(limit).collect())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::models::DiagnosticStatus;

    use super::*;

    fn entry(operation: &str, status: DiagnosticStatus) -> DiagnosticEntry {
        DiagnosticEntry {
            request_id: uuid::Uuid::new_v4().to_string(),
            operation: operation.to_string(),
            status,
            latency_ms: 3,
            created_at: chrono::Utc::now().to_rfc3339(),
            path: None,
            error_code: None,
            error_message: None,
            details: Some(serde_json::json!({"hits": 2})),
        }
    }

    #[test]
    fn jsonl_log_appends_and_reads_back_newest_first() {
        let temp = tempdir().expect("tempdir");
        let log = JsonlDiagnosticLog::in_dir(temp.path().join("logs"));
        log.record(&entry("bookmarks.search", DiagnosticStatus::Ok));
        log.record(&entry("bookmarks.create", DiagnosticStatus::Error));

        let entries = read_diagnostics(log.path(), 10).expect("read");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation, "bookmarks.create");
        assert_eq!(entries[0].status, DiagnosticStatus::Error);
        assert_eq!(entries[1].details, Some(serde_json::json!({"hits": 2})));
    }

    #[test]
    fn read_diagnostics_skips_garbage_and_missing_file() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join(DIAGNOSTIC_LOG_FILE);
        assert!(read_diagnostics(&path, 5).expect("missing").is_empty());

        let line = serde_json::to_string(&entry("tabs.list", DiagnosticStatus::Warning))
            .expect("encode");
        fs::write(&path, format!("garbage\n{line}\n")).expect("write");
        let entries = read_diagnostics(&path, 5).expect("read");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status.as_str(), "warning");

        fs::write(&path, "garbage\nmore garbage\n").expect("write");
        let err = read_diagnostics(&path, 5).expect_err("all invalid");
        assert!(matches!(err, MarkhopError::Validation(_)));
    }

    #[test]
    fn memory_sink_collects_entries() {
        let sink = MemoryDiagnostics::new();
        sink.record(&entry("tabs.list", DiagnosticStatus::Ok));
        assert_eq!(sink.entries().len(), 1);
    }
}
