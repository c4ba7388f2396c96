use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, params};

use crate::config::TabsConfig;
use crate::error::{MarkhopError, Result};
use crate::models::BookmarkRecord;

const MICROS_PER_HOUR: i64 = 3_600_000_000;

const RECENT_TABS_SQL: &str = r#"
    SELECT urls.url, urls.title
    FROM urls
    JOIN visits ON urls.id = visits.url
    WHERE visits.visit_time > (
        SELECT MAX(visit_time) - ?1 FROM visits
    )
    GROUP BY urls.url
    ORDER BY MAX(visits.visit_time) DESC
    LIMIT ?2
"#;

/// Recently visited pages from a Chrome `History` database.
///
/// Chrome holds a lock on the live file, so every read goes through a private
/// copy in `scratch_dir` that is removed afterwards.
#[derive(Debug, Clone)]
pub struct HistoryTabSource {
    history_path: PathBuf,
    scratch_dir: PathBuf,
    tabs: TabsConfig,
}

impl HistoryTabSource {
    pub fn new(history_path: impl Into<PathBuf>, scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            scratch_dir: scratch_dir.into(),
            tabs: TabsConfig::default(),
        }
    }

    #[must_use]
    pub fn with_tabs_config(mut self, tabs: TabsConfig) -> Self {
        self.tabs = tabs;
        self
    }

    #[must_use]
    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    /// Pages visited within the window before the newest visit, newest first.
    /// Rows without a url or title are dropped.
    pub fn recent_tabs(&self) -> Result<Vec<BookmarkRecord>> {
        if !self.history_path.is_file() {
            return Err(MarkhopError::NotFound(
                self.history_path.display().to_string(),
            ));
        }
        let scratch = ScratchCopy::create(&self.history_path, &self.scratch_dir)?;
        let conn = Connection::open_with_flags(
            scratch.path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let window_hours = i64::try_from(self.tabs.window_hours).unwrap_or(i64::MAX);
        let window_us = window_hours.saturating_mul(MICROS_PER_HOUR);
        let limit = i64::try_from(self.tabs.limit).unwrap_or(i64::MAX);
        query_recent(&conn, window_us, limit)
    }
}

fn query_recent(conn: &Connection, window_us: i64, limit: i64) -> Result<Vec<BookmarkRecord>> {
    let mut stmt = conn.prepare(RECENT_TABS_SQL)?;
    let rows = stmt.query_map(params![window_us, limit], |row| {
        Ok((
            row.get::<_, Option<String>>(0)?,
            row.get::<_, Option<String>>(1)?,
        ))
    })?;

    let mut tabs = Vec::new();
    for row in rows {
        let (url, title) = row?;
        if let (Some(url), Some(title)) = (url, title)
            && !url.is_empty()
            && !title.is_empty()
        {
            tabs.push(BookmarkRecord::tab(title, url));
        }
    }
    Ok(tabs)
}

struct ScratchCopy {
    path: PathBuf,
}

impl ScratchCopy {
    fn create(source: &Path, scratch_dir: &Path) -> Result<Self> {
        fs::create_dir_all(scratch_dir)?;
        let path = scratch_dir.join(format!(
            "markhop-history-{}.sqlite3",
            uuid::Uuid::new_v4().simple()
        ));
        fs::copy(source, &path)?;
        Ok(Self { path })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchCopy {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
