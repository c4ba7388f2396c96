use std::time::Instant;

use crate::models::BookmarkRecord;

use super::Markhop;
use super::request_log_service::new_request_id;

impl Markhop {
    /// Recently visited pages; any failure reading history yields no tabs.
    pub fn open_tabs(&self) -> Vec<BookmarkRecord> {
        let request_id = new_request_id();
        let started = Instant::now();
        let path = Some(self.tabs.history_path().display().to_string());

        match self.tabs.recent_tabs() {
            Ok(tabs) => {
                self.log_request_status(
                    request_id,
                    "tabs.list",
                    started,
                    path,
                    Some(serde_json::json!({ "tabs": tabs.len() })),
                );
                tabs
            }
            Err(err) => {
                self.log_request_degraded(request_id, "tabs.list", started, path, &err);
                Vec::new()
            }
        }
    }
}
