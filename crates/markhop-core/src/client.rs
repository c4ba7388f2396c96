use std::sync::Arc;

use crate::config::AppConfig;
use crate::diagnostics::{DiagnosticSink, JsonlDiagnosticLog, NoopDiagnostics};
use crate::store::BookmarkStore;
use crate::tabs::HistoryTabSource;

mod bookmark_service;
mod request_log_service;
mod tabs_service;

/// Entry point for launcher-facing operations.
///
/// Read operations degrade to empty results and writes report a boolean;
/// the reason for either ends up in the diagnostic sink, never in the result.
#[derive(Clone)]
pub struct Markhop {
    config: AppConfig,
    store: BookmarkStore,
    tabs: HistoryTabSource,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for Markhop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Markhop")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Markhop {
    pub fn new(config: AppConfig) -> Self {
        let diagnostics: Arc<dyn DiagnosticSink> = match &config.log_dir {
            Some(dir) => Arc::new(JsonlDiagnosticLog::in_dir(dir)),
            None => Arc::new(NoopDiagnostics),
        };
        Self::with_diagnostics(config, diagnostics)
    }

    pub fn with_diagnostics(config: AppConfig, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        let store = BookmarkStore::new(&config.bookmarks_path);
        let tabs = HistoryTabSource::new(&config.history_path, &config.scratch_dir)
            .with_tabs_config(config.tabs.clone());
        Self {
            config,
            store,
            tabs,
            diagnostics,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &BookmarkStore {
        &self.store
    }

    /// One line per data file telling whether it exists.
    #[must_use]
    pub fn debug_paths(&self) -> Vec<String> {
        let describe = |label: &str, path: &std::path::Path| {
            if path.is_file() {
                format!("Chrome {label} found at: {}", path.display())
            } else {
                format!("Chrome {label} NOT found at: {}", path.display())
            }
        };
        vec![
            describe("bookmarks", self.store.path()),
            describe("history", self.tabs.history_path()),
        ]
    }
}
