use std::time::Instant;

use crate::error::{MarkhopError, Result};
use crate::index::{SearchOptions, search};
use crate::models::BookmarkRecord;
use crate::resolver::FolderResolver;

use super::Markhop;
use super::request_log_service::new_request_id;

impl Markhop {
    pub fn search_bookmarks(&self, query: Option<&str>) -> Vec<BookmarkRecord> {
        self.search_bookmarks_with(query, &self.config.search)
    }

    /// A missing or unreadable store answers with no results.
    pub fn search_bookmarks_with(
        &self,
        query: Option<&str>,
        options: &SearchOptions,
    ) -> Vec<BookmarkRecord> {
        let request_id = new_request_id();
        let started = Instant::now();
        let path = Some(self.store.path().display().to_string());

        let forest = match self.store.load() {
            Ok(forest) => forest,
            Err(err) => {
                self.log_request_degraded(request_id, "bookmarks.search", started, path, &err);
                return Vec::new();
            }
        };

        let query = query.unwrap_or_default();
        let hits = search(&forest, query, options);
        self.log_request_status(
            request_id,
            "bookmarks.search",
            started,
            path,
            Some(serde_json::json!({
                "query": query,
                "hits": hits.len(),
            })),
        );
        hits
    }

    /// Returns `false` when anything fails; nothing is written in that case.
    pub fn create_bookmark(
        &self,
        url: &str,
        folder_path: &str,
        title: &str,
        resolver: &FolderResolver,
    ) -> bool {
        let request_id = new_request_id();
        let started = Instant::now();
        let path = Some(self.store.path().display().to_string());
        let details = serde_json::json!({
            "url": url,
            "folder_path": folder_path,
            "title": title,
            "root": resolver.root(),
        });

        match self.try_create_bookmark(url, folder_path, title, resolver) {
            Ok(()) => {
                self.log_request_status(
                    request_id,
                    "bookmarks.create",
                    started,
                    path,
                    Some(details),
                );
                true
            }
            Err(err) => {
                self.log_request_error(
                    request_id,
                    "bookmarks.create",
                    started,
                    path,
                    &err,
                    Some(details),
                );
                false
            }
        }
    }

    /// Unlike search, a missing or corrupt store is an error here so that it
    /// is never replaced by a fresh document.
    pub fn try_create_bookmark(
        &self,
        url: &str,
        folder_path: &str,
        title: &str,
        resolver: &FolderResolver,
    ) -> Result<()> {
        if url.trim().is_empty() {
            return Err(MarkhopError::Validation(
                "bookmark url must not be empty".to_string(),
            ));
        }
        let mut forest = self.store.load()?;
        resolver.resolve_and_append(&mut forest, url, folder_path, title)?;
        self.store.save(&forest)
    }
}
